use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub text: String,
}

/// Body returned by `POST /generate`: the model answer or the refusal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub raw_text: String,
}

/// Distinct package names pulled out of generated text.
pub type CandidateSet = BTreeSet<String>;
