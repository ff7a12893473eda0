//! YAML configuration for the facegate CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use facegate_registry::HttpRegistry;
use facegate_store::{HttpStore, StoreConfig};
use facegate_verify::{Verifier, VerifyConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Embedding dimensionality D of the deployed extractor model.
    pub dimension: usize,
    /// Duplicate decision threshold in (0, 1). No default on purpose:
    /// the value depends on the extractor model and must be chosen per
    /// deployment.
    pub threshold: f32,
    #[serde(default = "default_concurrency")]
    pub fetch_concurrency: usize,
    pub store: StoreSection,
    pub registry: RegistrySection,
    #[serde(default)]
    pub extractor: Option<ExtractorSection>,
}

#[derive(Debug, Deserialize)]
pub struct StoreSection {
    pub write_url: String,
    #[serde(default)]
    pub auth_token: String,
    pub gateways: Vec<String>,
    #[serde(default = "default_gateway_timeout_secs")]
    pub gateway_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct RegistrySection {
    pub base_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractorSection {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_concurrency() -> usize {
    facegate_verify::DEFAULT_FETCH_CONCURRENCY
}

fn default_gateway_timeout_secs() -> u64 {
    facegate_store::DEFAULT_GATEWAY_TIMEOUT.as_secs()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
    }

    /// Wires the configured store and registry into a [`Verifier`].
    pub fn build_verifier(&self) -> Result<Verifier> {
        let store = HttpStore::new(
            StoreConfig::new(
                &self.store.write_url,
                &self.store.auth_token,
                self.store.gateways.clone(),
            )
            .with_gateway_timeout(Duration::from_secs(self.store.gateway_timeout_secs)),
        )?;

        let config = VerifyConfig::new(self.dimension, self.threshold)?
            .with_fetch_concurrency(self.fetch_concurrency);

        Ok(Verifier::new(
            config,
            Arc::new(store),
            Arc::new(self.build_registry()),
        ))
    }

    pub fn build_registry(&self) -> HttpRegistry {
        let mut registry = HttpRegistry::new(&self.registry.base_url);
        if let Some(token) = &self.registry.auth_token {
            registry = registry.with_token(token);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let yaml = r#"
dimension: 512
threshold: 0.6
store:
  write_url: https://store.example/upload
  auth_token: secret
  gateways:
    - https://gw1.example/content/
    - https://gw2.example/content/
registry:
  base_url: https://registry.example
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.dimension, 512);
        assert_eq!(cfg.threshold, 0.6);
        assert_eq!(cfg.fetch_concurrency, default_concurrency());
        assert_eq!(cfg.store.gateways.len(), 2);
        assert_eq!(cfg.store.gateway_timeout_secs, 5);
        assert!(cfg.registry.auth_token.is_none());
        assert!(cfg.extractor.is_none());
    }

    #[test]
    fn missing_threshold_is_an_error() {
        let yaml = r#"
dimension: 512
store:
  write_url: https://store.example/upload
  gateways: [https://gw.example/]
registry:
  base_url: https://registry.example
"#;
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
