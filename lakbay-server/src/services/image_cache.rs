//! Image proxy with a bounded in-memory cache
//!
//! Entries expire after a TTL. When the cache is full, expired entries are
//! swept first and then the oldest entry is evicted. The cache is process
//! local and starts empty on restart.

use crate::types::ProviderError;
use axum::body::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Only Unsplash's image CDN may be proxied
pub const ALLOWED_IMAGE_PREFIX: &str = "https://images.unsplash.com/";

const USER_AGENT: &str = concat!("Lakbay/", env!("CARGO_PKG_VERSION"));
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Cached image body with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

struct Entry {
    image: CachedImage,
    inserted_at: Instant,
}

/// Bounded TTL cache keyed by source URL
pub struct ImageCache {
    entries: Mutex<HashMap<String, Entry>>,
    capacity: usize,
    ttl: Duration,
}

impl ImageCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Fresh entry for `url`, if any
    pub fn get(&self, url: &str) -> Option<CachedImage> {
        self.get_at(url, Instant::now())
    }

    fn get_at(&self, url: &str, now: Instant) -> Option<CachedImage> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get(url) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.image.clone())
            }
            Some(_) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, url: &str, image: CachedImage) {
        self.insert_at(url, image, Instant::now());
    }

    fn insert_at(&self, url: &str, image: CachedImage, now: Instant) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if !entries.contains_key(url) && entries.len() >= self.capacity {
            entries.retain(|_, e| now.duration_since(e.inserted_at) < self.ttl);

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone());
                if let Some(key) = oldest {
                    entries.remove(&key);
                }
            }
        }

        entries.insert(
            url.to_string(),
            Entry {
                image,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Fetches allow-listed images through the cache
pub struct ImageProxy {
    http_client: reqwest::Client,
    cache: ImageCache,
    allowed_prefix: String,
}

impl ImageProxy {
    pub fn new(cache: ImageCache) -> Result<Self, ProviderError> {
        Self::with_allowed_prefix(cache, ALLOWED_IMAGE_PREFIX)
    }

    pub fn with_allowed_prefix(
        cache: ImageCache,
        allowed_prefix: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Upstream {
                provider: "image",
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            cache,
            allowed_prefix: allowed_prefix.into(),
        })
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        url.starts_with(&self.allowed_prefix)
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Cached copy of `url`, fetching it on a miss
    ///
    /// Callers must check [`is_allowed`](Self::is_allowed) first.
    pub async fn fetch(&self, url: &str) -> Result<CachedImage, ProviderError> {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!(url = url, "Image cache hit");
            return Ok(hit);
        }

        let upstream = |message: String| ProviderError::Upstream {
            provider: "image",
            message,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream(format!("HTTP {}", status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(|e| upstream(e.to_string()))?;

        tracing::debug!(url = url, size = bytes.len(), "Image fetched");

        let image = CachedImage {
            bytes,
            content_type,
        };
        self.cache.insert(url, image.clone());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tag: &'static str) -> CachedImage {
        CachedImage {
            bytes: Bytes::from_static(tag.as_bytes()),
            content_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = ImageCache::new(4, Duration::from_secs(60));
        cache.insert("a", image("a"));

        assert_eq!(cache.get("a"), Some(image("a")));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = ImageCache::new(4, Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("a", image("a"), start);

        assert!(cache.get_at("a", start + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_full_cache_evicts_oldest() {
        let cache = ImageCache::new(2, Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("a", image("a"), start);
        cache.insert_at("b", image("b"), start + Duration::from_secs(1));
        cache.insert_at("c", image("c"), start + Duration::from_secs(2));

        let now = start + Duration::from_secs(3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at("a", now).is_none());
        assert!(cache.get_at("b", now).is_some());
        assert!(cache.get_at("c", now).is_some());
    }

    #[test]
    fn test_full_cache_prefers_sweeping_expired() {
        let cache = ImageCache::new(2, Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("old", image("old"), start);
        cache.insert_at("fresh", image("fresh"), start + Duration::from_secs(9));
        cache.insert_at("new", image("new"), start + Duration::from_secs(11));

        let now = start + Duration::from_secs(12);
        assert!(cache.get_at("fresh", now).is_some());
        assert!(cache.get_at("new", now).is_some());
    }

    #[test]
    fn test_allow_list() {
        let proxy = ImageProxy::new(ImageCache::new(1, Duration::from_secs(1))).unwrap();

        assert!(proxy.is_allowed("https://images.unsplash.com/photo-1?w=1080"));
        assert!(!proxy.is_allowed("https://images.unsplash.com.evil.example/x"));
        assert!(!proxy.is_allowed("http://169.254.169.254/latest/meta-data"));
    }
}
