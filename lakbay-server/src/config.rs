//! Configuration resolution for lakbay-server
//!
//! API keys resolve with Database → ENV → TOML priority. A key that is
//! missing everywhere disables its provider rather than failing startup.

use crate::types::{ConfigSource, ProviderError};
use async_trait::async_trait;
use lakbay_common::config::{FeatureConfig, TomlConfig};
use lakbay_common::kv::KeyValueStore;
use lakbay_common::Result;
use tracing::{info, warn};

/// Settings-table key for the Unsplash access key
pub const SETTING_UNSPLASH_ACCESS_KEY: &str = "unsplash_access_key";
/// Settings-table key for the Gemini API key
pub const SETTING_GEMINI_API_KEY: &str = "gemini_api_key";

pub const UNSPLASH_ACCESS_KEY_ENV: &str = "LAKBAY_UNSPLASH_ACCESS_KEY";
pub const GEMINI_API_KEY_ENV: &str = "LAKBAY_GEMINI_API_KEY";

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve one API key from the three tiers
async fn resolve_api_key(
    store: &dyn KeyValueStore,
    setting_key: &str,
    env_var: &str,
    toml_key: Option<&String>,
    label: &str,
) -> Result<Option<String>> {
    let db_key = store.get(setting_key).await?.filter(|k| is_valid_key(k));
    let env_key = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_key.filter(|k| is_valid_key(k)).cloned();

    let sources: Vec<&str> = [
        db_key.as_ref().map(|_| "database"),
        env_key.as_ref().map(|_| "environment"),
        toml_key.as_ref().map(|_| "TOML"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using {} (highest priority).",
            label,
            sources.join(", "),
            sources[0]
        );
    }

    let resolved = db_key.or(env_key).or(toml_key);
    match sources.first() {
        Some(source) => info!("{} loaded from {}", label, source),
        None => warn!(
            "{} not configured (set {} or {} in the TOML config); provider disabled",
            label, env_var, setting_key
        ),
    }

    Ok(resolved.map(|k| k.trim().to_string()))
}

pub async fn resolve_unsplash_access_key(
    store: &dyn KeyValueStore,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    resolve_api_key(
        store,
        SETTING_UNSPLASH_ACCESS_KEY,
        UNSPLASH_ACCESS_KEY_ENV,
        toml_config.unsplash_access_key.as_ref(),
        "Unsplash access key",
    )
    .await
}

pub async fn resolve_gemini_api_key(
    store: &dyn KeyValueStore,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    resolve_api_key(
        store,
        SETTING_GEMINI_API_KEY,
        GEMINI_API_KEY_ENV,
        toml_config.gemini_api_key.as_ref(),
        "Gemini API key",
    )
    .await
}

/// Remote feature flags served from the bootstrap TOML
#[derive(Debug, Clone, Default)]
pub struct TomlConfigSource {
    features: FeatureConfig,
}

impl TomlConfigSource {
    pub fn new(features: FeatureConfig) -> Self {
        Self { features }
    }
}

#[async_trait]
impl ConfigSource for TomlConfigSource {
    async fn fetch(&self) -> std::result::Result<FeatureConfig, ProviderError> {
        Ok(self.features.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("  \t"));
    }

    #[tokio::test]
    async fn test_toml_config_source_echoes_features() {
        let features = FeatureConfig {
            prioritize_gemini: true,
            fast_mode_default: false,
        };
        let source = TomlConfigSource::new(features.clone());

        assert_eq!(source.fetch().await.unwrap(), features);
    }
}
