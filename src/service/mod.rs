//! Guard pipeline services
//!
//! - `generation`: language model backend client and prompt-echo stripping
//! - `extractor`: install-command candidate extraction
//! - `registry`: package registry existence probes
//! - `guard`: the per-request pipeline tying them together

pub mod extractor;
pub mod generation;
pub mod guard;
pub mod registry;

pub use extractor::CandidateExtractor;
pub use generation::{strip_prompt_echo, GenerationBackend, OllamaClient};
pub use guard::GuardService;
pub use registry::{HttpRegistryProbe, RegistryChecker, RegistryProbe};
