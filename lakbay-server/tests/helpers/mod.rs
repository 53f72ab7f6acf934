//! Shared fakes for lakbay-server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use lakbay_common::config::{FeatureConfig, RateLimitConfig};
use lakbay_common::{KeyValueStore, MemoryStore};
use lakbay_server::services::{ImageCache, ImageProxy};
use lakbay_server::types::{
    ConfigSource, Photo, PhotoProvider, ProviderError, RandomSource, TextDescription, TextProvider,
};
use lakbay_server::{AppState, Providers};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        url: format!("https://images.unsplash.com/{}", id),
        alt_text: None,
        photographer_name: "Juan".to_string(),
        photographer_username: "juan".to_string(),
        photographer_profile_url: "https://unsplash.com/@juan".to_string(),
        download_location: Some(format!("https://api.unsplash.com/photos/{}/download", id)),
    }
}

fn upstream(provider: &'static str) -> ProviderError {
    ProviderError::Upstream {
        provider,
        message: "simulated failure".to_string(),
    }
}

/// Photo provider answering named (count 1) and fallback (count > 1)
/// searches separately; `None` fails the call
pub struct FakePhotos {
    pub named: Option<Vec<Photo>>,
    pub fallback: Option<Vec<Photo>>,
    pub queries: Mutex<Vec<(String, u8)>>,
    pub notified: Mutex<Vec<String>>,
}

impl FakePhotos {
    pub fn new(named: Option<Vec<Photo>>, fallback: Option<Vec<Photo>>) -> Self {
        Self {
            named,
            fallback,
            queries: Mutex::new(Vec::new()),
            notified: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(None, None)
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Wait for fire-and-forget notifications to land
    pub async fn wait_for_notifications(&self, expected: usize) -> Vec<String> {
        for _ in 0..50 {
            if self.notified.lock().unwrap().len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.notified.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoProvider for FakePhotos {
    async fn search(&self, query: &str, count: u8) -> Result<Vec<Photo>, ProviderError> {
        self.queries.lock().unwrap().push((query.to_string(), count));
        let reply = if count == 1 { &self.named } else { &self.fallback };
        reply.clone().ok_or_else(|| upstream("photos"))
    }

    async fn notify_used(&self, download_location: &str) -> Result<(), ProviderError> {
        self.notified.lock().unwrap().push(download_location.to_string());
        Ok(())
    }
}

/// Text provider returning a fixed description, or failing when `None`
pub struct FakeText {
    pub name: &'static str,
    pub reply: Option<String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeText {
    pub fn ok(name: &'static str, text: &str) -> Self {
        Self {
            name,
            reply: Some(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            reply: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for FakeText {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn describe(
        &self,
        destination_name: &str,
        _activity_hint: &str,
    ) -> Result<TextDescription, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Some(text) => Ok(TextDescription {
                description: text.clone(),
                best_months_to_visit: None,
            }),
            None => Err(ProviderError::NotFound {
                provider: self.name,
                query: destination_name.to_string(),
            }),
        }
    }
}

/// Remote config; `None` fails every fetch
pub struct FakeConfig(pub Option<FeatureConfig>);

#[async_trait]
impl ConfigSource for FakeConfig {
    async fn fetch(&self) -> Result<FeatureConfig, ProviderError> {
        self.0.clone().ok_or_else(|| upstream("config"))
    }
}

/// Always picks the same index (clamped by the caller)
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub photos: Arc<FakePhotos>,
    pub gemini: Arc<FakeText>,
    pub wikipedia: Arc<FakeText>,
}

pub fn test_context(photos: FakePhotos, gemini: FakeText, wikipedia: FakeText) -> TestContext {
    test_context_with(photos, gemini, wikipedia, Some(FeatureConfig::default()), RateLimitConfig::default())
}

pub fn test_context_with(
    photos: FakePhotos,
    gemini: FakeText,
    wikipedia: FakeText,
    remote: Option<FeatureConfig>,
    rate_limit: RateLimitConfig,
) -> TestContext {
    build_context(photos, gemini, wikipedia, remote, rate_limit, FixedRandom(0))
}

/// Context whose fallback photo pick is fixed to index `pick`
pub fn test_context_picking(
    photos: FakePhotos,
    gemini: FakeText,
    wikipedia: FakeText,
    pick: usize,
) -> TestContext {
    build_context(
        photos,
        gemini,
        wikipedia,
        Some(FeatureConfig::default()),
        RateLimitConfig::default(),
        FixedRandom(pick),
    )
}

fn build_context(
    photos: FakePhotos,
    gemini: FakeText,
    wikipedia: FakeText,
    remote: Option<FeatureConfig>,
    rate_limit: RateLimitConfig,
    random: FixedRandom,
) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let photos = Arc::new(photos);
    let gemini = Arc::new(gemini);
    let wikipedia = Arc::new(wikipedia);

    let providers = Providers {
        photos: photos.clone(),
        gemini: gemini.clone(),
        wikipedia: wikipedia.clone(),
        config: Arc::new(FakeConfig(remote)),
    };
    let images = ImageProxy::new(ImageCache::new(8, Duration::from_secs(60))).unwrap();
    let kv: Arc<dyn KeyValueStore> = store.clone();

    let state = AppState::with_random(kv, providers, images, &rate_limit, Arc::new(random));

    TestContext {
        state,
        store,
        photos,
        gemini,
        wikipedia,
    }
}

/// Collect a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
