//! Recently used fallback images
//!
//! Keeps the last few fallback photo ids, most recent first, so consecutive
//! cards don't show the same generic photo.

use lakbay_common::kv::{get_json, set_json, KeyValueStore, KEY_RECENT_FALLBACK_IMAGES};
use lakbay_common::Result;
use std::sync::Arc;

/// How many recent fallback ids are remembered
pub const FALLBACK_MEMORY_SIZE: usize = 3;

#[derive(Clone)]
pub struct FallbackMemory {
    store: Arc<dyn KeyValueStore>,
}

impl FallbackMemory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Most-recent-first ids; an undecodable value reads as empty
    pub async fn recent(&self) -> Result<Vec<String>> {
        match get_json::<Vec<String>>(self.store.as_ref(), KEY_RECENT_FALLBACK_IMAGES).await {
            Ok(ids) => Ok(ids.unwrap_or_default()),
            Err(lakbay_common::Error::Config(msg)) => {
                tracing::warn!("Discarding unreadable fallback memory: {}", msg);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Move `id` to the front, keeping at most [`FALLBACK_MEMORY_SIZE`] ids
    pub async fn remember(&self, id: &str) -> Result<()> {
        let mut ids = self.recent().await?;
        ids.retain(|existing| existing != id);
        ids.insert(0, id.to_string());
        ids.truncate(FALLBACK_MEMORY_SIZE);
        set_json(self.store.as_ref(), KEY_RECENT_FALLBACK_IMAGES, &ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lakbay_common::MemoryStore;

    #[tokio::test]
    async fn test_keeps_three_most_recent_first() {
        let memory = FallbackMemory::new(Arc::new(MemoryStore::new()));

        for id in ["a", "b", "c", "d"] {
            memory.remember(id).await.unwrap();
        }

        assert_eq!(memory.recent().await.unwrap(), vec!["d", "c", "b"]);
    }

    #[tokio::test]
    async fn test_repeat_moves_to_front_without_duplicates() {
        let memory = FallbackMemory::new(Arc::new(MemoryStore::new()));

        for id in ["a", "b", "a"] {
            memory.remember(id).await.unwrap();
        }

        assert_eq!(memory.recent().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(KEY_RECENT_FALLBACK_IMAGES, "not json").await.unwrap();
        let memory = FallbackMemory::new(store);

        assert!(memory.recent().await.unwrap().is_empty());
        memory.remember("x").await.unwrap();
        assert_eq!(memory.recent().await.unwrap(), vec!["x"]);
    }
}
