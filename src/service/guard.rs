use crate::entities::{PromptRequest, ResponseBody};
use crate::error::AppError;
use crate::service::extractor::CandidateExtractor;
use crate::service::generation::{strip_prompt_echo, GenerationBackend, OllamaClient};
use crate::service::registry::RegistryChecker;
use crate::utils::config::{AppConfig, SafetyConfig};
use std::sync::Arc;

const USER_SEPARATOR: &str = "\n\nUser:\n";
const ASSISTANT_CUE: &str = "\n\nAssistant:\n";

/// Prompt hardening plus hallucinated-package filtering around one backend.
pub struct GuardService {
    backend: Arc<dyn GenerationBackend>,
    extractor: CandidateExtractor,
    registry: RegistryChecker,
    safety: SafetyConfig,
}

impl GuardService {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        extractor: CandidateExtractor,
        registry: RegistryChecker,
        safety: SafetyConfig,
    ) -> Self {
        Self { backend, extractor, registry, safety }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let backend = OllamaClient::new(config.backend.clone(), config.generation.clone())?;
        let extractor = CandidateExtractor::new(&config.extraction.patterns)?;
        let registry = RegistryChecker::from_config(&config.registry)?;
        Ok(Self::new(Arc::new(backend), extractor, registry, config.safety.clone()))
    }

    pub fn compose_prompt(&self, text: &str) -> String {
        format!("{}{}{}{}", self.safety.instruction, USER_SEPARATOR, text, ASSISTANT_CUE)
    }

    /// Runs one request through compose, generate, extract and verify.
    ///
    /// Either the stripped answer or the refusal message is returned in full;
    /// a rejected candidate discards the whole answer.
    pub async fn handle(&self, request: &PromptRequest) -> Result<ResponseBody, AppError> {
        let full_prompt = self.compose_prompt(&request.text);
        let generation = self.backend.generate(&full_prompt).await?;

        let answer = if self.safety.strip_prompt_echo {
            strip_prompt_echo(&generation.raw_text, &full_prompt, &self.safety.marker)
        } else {
            generation.raw_text.trim().to_string()
        };

        let candidates = self.extractor.extract_candidates(&answer);
        if candidates.is_empty() {
            return Ok(ResponseBody { text: answer });
        }

        log::info!("Verifying {} package candidate(s): {:?}", candidates.len(), candidates);
        match self.registry.first_missing(&candidates).await {
            Some(missing) => {
                log::warn!("Package {} not found in any registry, refusing answer", missing);
                Ok(ResponseBody { text: self.safety.refusal_message.clone() })
            }
            None => Ok(ResponseBody { text: answer }),
        }
    }
}
