use crate::entities::{CandidateSet, Existence};
use crate::error::AppError;
use crate::utils::config::{RegistryConfig, RegistryEndpoint};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// A single package registry that can answer "does this name exist?".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryProbe: Send + Sync {
    fn name(&self) -> String;

    async fn probe(&self, package: &str) -> Existence;
}

/// Probes a registry with a GET against a `{name}` URL template.
pub struct HttpRegistryProbe {
    name: String,
    url_template: String,
    client: reqwest::Client,
}

impl HttpRegistryProbe {
    pub fn new(endpoint: &RegistryEndpoint, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Config(format!("registry client for {}: {}", endpoint.name, e))
            })?;

        Ok(Self {
            name: endpoint.name.clone(),
            url_template: endpoint.url_template.clone(),
            client,
        })
    }

    pub fn url_for(&self, package: &str) -> String {
        self.url_template.replace("{name}", package)
    }
}

#[async_trait]
impl RegistryProbe for HttpRegistryProbe {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn probe(&self, package: &str) -> Existence {
        let url = self.url_for(package);
        match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                log::debug!("{} answered {} for {}", self.name, status, package);
                Existence::from_status(status)
            }
            Err(e) => {
                // fail-open, transport errors and timeouts only
                log::warn!(
                    "{} probe for {} failed, treating as existing: {}",
                    self.name,
                    package,
                    e
                );
                Existence::Unknown
            }
        }
    }
}

/// Checks candidates against every configured registry.
#[derive(Clone)]
pub struct RegistryChecker {
    probes: Vec<Arc<dyn RegistryProbe>>,
}

impl RegistryChecker {
    pub fn new(probes: Vec<Arc<dyn RegistryProbe>>) -> Self {
        Self { probes }
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, AppError> {
        let timeout = config.probe_timeout();
        let probes = config
            .endpoints
            .iter()
            .map(|endpoint| {
                HttpRegistryProbe::new(endpoint, timeout)
                    .map(|probe| Arc::new(probe) as Arc<dyn RegistryProbe>)
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self::new(probes))
    }

    /// True unless every registry definitively reports the package missing.
    pub async fn exists_in_any_registry(&self, package: &str) -> bool {
        if self.probes.is_empty() {
            log::warn!("No registries configured, accepting {}", package);
            return true;
        }

        let verdicts = join_all(self.probes.iter().map(|probe| async move {
            let existence = probe.probe(package).await;
            log::debug!("{}: {} -> {:?}", probe.name(), package, existence);
            existence
        }))
        .await;
        verdicts.into_iter().any(Existence::is_satisfied)
    }

    /// Returns the first candidate (in set order) that no registry knows,
    /// or `None` when all of them pass.
    pub async fn first_missing(&self, candidates: &CandidateSet) -> Option<String> {
        let checks = join_all(candidates.iter().map(|name| async move {
            let exists = self.exists_in_any_registry(name).await;
            (name, exists)
        }))
        .await;

        checks.into_iter().find(|(_, exists)| !exists).map(|(name, _)| name.clone())
    }
}
