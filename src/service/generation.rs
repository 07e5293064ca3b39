//! Client for the language model backend.
//!
//! The backend speaks the Ollama `/api/generate` protocol: a single
//! non-streaming POST with the full prompt, answered by a JSON object whose
//! `response` field holds the generated text.

use crate::entities::GenerationResult;
use crate::error::AppError;
use crate::utils::config::{BackendConfig, GenerationConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Sends the full prompt and returns the generated text verbatim.
    async fn generate(&self, full_prompt: &str) -> Result<GenerationResult, AppError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: usize,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

pub struct OllamaClient {
    client: reqwest::Client,
    backend: BackendConfig,
    generation: GenerationConfig,
}

impl OllamaClient {
    pub fn new(backend: BackendConfig, generation: GenerationConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(backend.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("backend client: {}", e)))?;

        Ok(Self { client, backend, generation })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::BackendTimeout(format!(
                "{} did not answer within {}s",
                self.backend.url, self.backend.timeout_secs
            ))
        } else {
            AppError::BackendUnavailable(format!("{}: {}", self.backend.url, err))
        }
    }
}

#[async_trait]
impl GenerationBackend for OllamaClient {
    async fn generate(&self, full_prompt: &str) -> Result<GenerationResult, AppError> {
        let payload = GenerateRequest {
            model: &self.backend.model,
            prompt: full_prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: self.generation.max_tokens,
                temperature: self.generation.effective_temperature(),
            },
        };

        log::debug!("Sending {} prompt chars to {}", full_prompt.len(), self.backend.url);

        let response = self
            .client
            .post(&self.backend.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BackendUnavailable(format!(
                "{} returned {}",
                self.backend.url, status
            )));
        }

        let body: GenerateResponse =
            response.json().await.map_err(|e| self.map_transport_error(e))?;

        Ok(GenerationResult { raw_text: body.response })
    }
}

/// Removes the echoed prompt from generated text.
///
/// The text after the last `marker` wins. Without a marker, a literal
/// `full_prompt` prefix is dropped. Either way the result is trimmed.
pub fn strip_prompt_echo(raw: &str, full_prompt: &str, marker: &str) -> String {
    if !marker.is_empty() {
        if let Some(idx) = raw.rfind(marker) {
            return raw[idx + marker.len()..].trim().to_string();
        }
    }

    match raw.strip_prefix(full_prompt) {
        Some(rest) => rest.trim().to_string(),
        None => raw.trim().to_string(),
    }
}
