//! Key-value store abstraction
//!
//! Local persistence for small flags and lists (fast-mode override,
//! onboarding flag, recent fallback images, request budget counters).
//! Services take an `Arc<dyn KeyValueStore>` so tests can swap in
//! [`MemoryStore`] for the SQLite-backed store.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Fast-mode local override
pub const KEY_FAST_MODE: &str = "fast_mode";
/// Gemini-first local override
pub const KEY_PRIORITIZE_GEMINI: &str = "prioritize_gemini";
/// Onboarding has been shown
pub const KEY_SEEN_ONBOARDING: &str = "seen_onboarding";
/// Recently used fallback image ids (JSON array, most-recent-first)
pub const KEY_RECENT_FALLBACK_IMAGES: &str = "recent_fallback_images";
/// Description requests made in the current window
pub const KEY_RATE_LIMIT_COUNT: &str = "rate_limit_count";
/// RFC 3339 timestamp at which the request window resets
pub const KEY_RATE_LIMIT_RESET_AT: &str = "rate_limit_reset_at";

/// String-valued key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never set or was cleared
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key (no-op when absent)
    async fn clear(&self, key: &str) -> Result<()>;
}

/// Read and parse a value with `FromStr`
pub async fn get_parsed<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match store.get(key).await? {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("Parse setting {} failed: {}", key, e))),
        None => Ok(None),
    }
}

/// Read a JSON-encoded value
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(value) => serde_json::from_str(&value)
            .map(Some)
            .map_err(|e| Error::Config(format!("Decode setting {} failed: {}", key, e))),
        None => Ok(None),
    }
}

/// Write a JSON-encoded value
pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("Encode setting {} failed: {}", key, e)))?;
    store.set(key, &encoded).await
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
