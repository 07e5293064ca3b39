use serde::Deserialize;
use std::time::Duration;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CODER_GUARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/app.yml";

const DEFAULT_SAFETY_INSTRUCTION: &str = "You are a coding assistant that must never invent or \
guess software package names. Only recommend packages that are confirmed to exist in official \
registries (e.g., PyPI, npm, RubyGems, Crates.io, CPAN, etc.). If you are not sure that a \
package exists, explicitly say that you are unsure and do NOT make up a name.";

const DEFAULT_REFUSAL_MESSAGE: &str = "I cannot confidently identify any existing package that \
matches this description in public registries. Please search directly on the official registry \
website (e.g., PyPI, npm) instead of trusting this suggestion.";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: u64,
    pub client_request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            shutdown_timeout: 30,
            client_request_timeout_secs: 30,
        }
    }
}

/// Where the language model lives and how long we wait for it.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:11434/api/generate".to_string(),
            model: "tinyllama".to_string(),
            timeout_secs: 300,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_tokens: usize,
    pub sampling: bool,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { max_tokens: 256, sampling: false, temperature: 0.2 }
    }
}

impl GenerationConfig {
    /// Temperature actually sent to the backend; greedy decoding unless sampling is on.
    pub fn effective_temperature(&self) -> f32 {
        if self.sampling {
            self.temperature
        } else {
            0.0
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryEndpoint {
    pub name: String,
    /// URL with a `{name}` placeholder for the package.
    pub url_template: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegistryConfig {
    pub probe_timeout_secs: u64,
    pub endpoints: Vec<RegistryEndpoint>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 5,
            endpoints: vec![
                RegistryEndpoint {
                    name: "pypi".to_string(),
                    url_template: "https://pypi.org/pypi/{name}/json".to_string(),
                },
                RegistryEndpoint {
                    name: "npm".to_string(),
                    url_template: "https://registry.npmjs.org/{name}".to_string(),
                },
            ],
        }
    }
}

impl RegistryConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    pub patterns: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                r"pip install ([a-zA-Z0-9_\-]+)".to_string(),
                r"npm install ([a-zA-Z0-9_\-@/]+)".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SafetyConfig {
    pub instruction: String,
    pub refusal_message: String,
    /// Literal separating the echoed prompt from the answer.
    pub marker: String,
    pub strip_prompt_echo: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_SAFETY_INSTRUCTION.to_string(),
            refusal_message: DEFAULT_REFUSAL_MESSAGE.to_string(),
            marker: "Assistant:".to_string(),
            strip_prompt_echo: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub generation: GenerationConfig,
    pub registry: RegistryConfig,
    pub extraction: ExtractionConfig,
    pub safety: SafetyConfig,
}

impl AppConfig {
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config_file = std::fs::File::open(config_path)?;
        let config: Self = serde_yaml::from_reader(config_file)?;
        Ok(config)
    }

    /// Path from `CODER_GUARD_CONFIG`, falling back to `config/app.yml`.
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "backend:\n  model: deepseek-coder\nregistry:\n  probe_timeout_secs: 2\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.model, "deepseek-coder");
        assert_eq!(config.backend.timeout_secs, 300);
        assert_eq!(config.registry.probe_timeout_secs, 2);
        assert_eq!(config.registry.endpoints.len(), 2);
        assert_eq!(config.safety.marker, "Assistant:");
    }

    #[test]
    fn greedy_decoding_by_default() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.effective_temperature(), 0.0);

        let sampled = GenerationConfig { sampling: true, ..GenerationConfig::default() };
        assert_eq!(sampled.effective_temperature(), 0.2);
    }
}
