//! lakbay-server library interface
//!
//! HTTP service around the quiz engine: recommendations, the content
//! resolution pipeline, provider pass-throughs, and local settings.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use lakbay_common::config::RateLimitConfig;
use lakbay_common::KeyValueStore;
use services::{ContentResolver, ImageProxy, RateGate, ViewTracker};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use types::{ConfigSource, PhotoProvider, RandomSource, TextProvider, ThreadRandom};

/// External collaborators, injected so tests can swap in fakes
#[derive(Clone)]
pub struct Providers {
    pub photos: Arc<dyn PhotoProvider>,
    pub gemini: Arc<dyn TextProvider>,
    pub wikipedia: Arc<dyn TextProvider>,
    pub config: Arc<dyn ConfigSource>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Local settings (fast-mode override, onboarding, counters)
    pub store: Arc<dyn KeyValueStore>,
    pub providers: Providers,
    pub resolver: Arc<ContentResolver>,
    pub gate: Arc<RateGate>,
    pub images: Arc<ImageProxy>,
    pub views: Arc<ViewTracker>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last provider error for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        providers: Providers,
        images: ImageProxy,
        rate_limit: &RateLimitConfig,
    ) -> Self {
        Self::with_random(store, providers, images, rate_limit, Arc::new(ThreadRandom))
    }

    pub fn with_random(
        store: Arc<dyn KeyValueStore>,
        providers: Providers,
        images: ImageProxy,
        rate_limit: &RateLimitConfig,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let gate = Arc::new(RateGate::new(store.clone(), rate_limit));
        let resolver = ContentResolver::new(
            providers.photos.clone(),
            providers.gemini.clone(),
            providers.wikipedia.clone(),
            providers.config.clone(),
            store.clone(),
            random,
            gate.clone(),
        );

        Self {
            store,
            providers,
            resolver: Arc::new(resolver),
            gate,
            images: Arc::new(images),
            views: Arc::new(ViewTracker::new()),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember a failure for `/health`
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::quiz_routes())
        .merge(api::content_routes())
        .merge(api::proxy_routes())
        .merge(api::settings_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
