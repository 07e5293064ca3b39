pub mod existence;
pub mod prompt;

pub use existence::Existence;
pub use prompt::{CandidateSet, GenerationResult, PromptRequest, ResponseBody};
