//! Provider traits and the data they exchange
//!
//! The content pipeline talks to its collaborators only through these
//! traits, so tests can substitute deterministic fakes for the HTTP
//! clients, the remote config source, and the random picker.

use async_trait::async_trait;
use lakbay_common::config::FeatureConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Photo returned by a photo search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub photographer_name: String,
    pub photographer_username: String,
    pub photographer_profile_url: String,
    /// Usage-tracking endpoint to ping when the photo is displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
}

/// Short destination description from a text provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDescription {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_months_to_visit: Option<String>,
}

/// Failure reported by an external provider
///
/// Each client converts its own error enum into one of these variants so
/// handlers can map failures to HTTP statuses uniformly.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("{0} rate limit exceeded")]
    RateLimited(&'static str),

    #[error("{provider}: nothing found for {query:?}")]
    NotFound {
        provider: &'static str,
        query: String,
    },

    #[error("{provider}: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },
}

/// Photo search and usage tracking
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Search photos; an empty result is `Ok(vec![])`
    async fn search(&self, query: &str, count: u8) -> Result<Vec<Photo>, ProviderError>;

    /// Report that a photo was displayed
    async fn notify_used(&self, download_location: &str) -> Result<(), ProviderError>;
}

/// Destination description source
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short name used in logs and responses
    fn name(&self) -> &'static str;

    async fn describe(
        &self,
        destination_name: &str,
        activity_hint: &str,
    ) -> Result<TextDescription, ProviderError>;
}

/// Remote feature flags
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<FeatureConfig, ProviderError>;
}

/// Uniform index picker
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// [`RandomSource`] backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let random = ThreadRandom;
        for _ in 0..100 {
            assert!(random.pick(3) < 3);
        }
        assert_eq!(random.pick(1), 0);
    }

    #[test]
    fn test_photo_omits_missing_optionals() {
        let photo = Photo {
            id: "p1".to_string(),
            url: "https://images.unsplash.com/p1".to_string(),
            alt_text: None,
            photographer_name: "Ana".to_string(),
            photographer_username: "ana".to_string(),
            photographer_profile_url: "https://unsplash.com/@ana".to_string(),
            download_location: None,
        };

        let json = serde_json::to_value(&photo).unwrap();
        assert!(json.get("alt_text").is_none());
        assert!(json.get("download_location").is_none());
    }
}
