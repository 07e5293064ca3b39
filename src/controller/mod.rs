pub mod prompt;

pub use prompt::{generate, json_config, not_found};
