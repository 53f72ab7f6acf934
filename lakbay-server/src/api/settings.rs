//! Settings, remote config, and request budget endpoints
//!
//! The fast-mode toggle is two-tier: a local override stored in the
//! settings table, else the remote `fast_mode_default` flag. DELETE drops
//! the override so the remote flag applies again.

use crate::services::{ContentFlags, RateStatus};
use crate::{ApiResult, AppState};
use axum::{extract::State, routing::get, Json, Router};
use lakbay_common::config::FeatureConfig;
use lakbay_common::kv::{get_parsed, KEY_FAST_MODE, KEY_SEEN_ONBOARDING};
use serde::{Deserialize, Serialize};
use tracing::info;

/// GET /api/config
///
/// Remote feature flags; an unreachable source reads as all off.
pub async fn get_config(State(state): State<AppState>) -> Json<FeatureConfig> {
    let features = match state.providers.config.fetch().await {
        Ok(features) => features,
        Err(e) => {
            tracing::warn!("Remote config unavailable: {}", e);
            FeatureConfig::default()
        }
    };
    Json(features)
}

#[derive(Debug, Serialize)]
pub struct FastModeResponse {
    /// Effective value after applying the override
    pub enabled: bool,
    /// Local override, `None` when the remote default applies
    pub local_override: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FastModeRequest {
    pub enabled: bool,
}

async fn fast_mode_response(state: &AppState) -> ApiResult<FastModeResponse> {
    let local_override = get_parsed::<bool>(state.store.as_ref(), KEY_FAST_MODE).await?;
    let flags =
        ContentFlags::resolve(state.store.as_ref(), state.providers.config.as_ref()).await;
    Ok(FastModeResponse {
        enabled: flags.fast_mode,
        local_override,
    })
}

/// GET /api/settings/fast_mode
pub async fn get_fast_mode(State(state): State<AppState>) -> ApiResult<Json<FastModeResponse>> {
    Ok(Json(fast_mode_response(&state).await?))
}

/// PUT /api/settings/fast_mode
pub async fn set_fast_mode(
    State(state): State<AppState>,
    Json(request): Json<FastModeRequest>,
) -> ApiResult<Json<FastModeResponse>> {
    state
        .store
        .set(KEY_FAST_MODE, if request.enabled { "true" } else { "false" })
        .await?;
    info!(enabled = request.enabled, "Fast mode override set");
    Ok(Json(fast_mode_response(&state).await?))
}

/// DELETE /api/settings/fast_mode
pub async fn clear_fast_mode(State(state): State<AppState>) -> ApiResult<Json<FastModeResponse>> {
    state.store.clear(KEY_FAST_MODE).await?;
    info!("Fast mode override cleared");
    Ok(Json(fast_mode_response(&state).await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OnboardingState {
    pub seen: bool,
}

/// GET /api/settings/onboarding
pub async fn get_onboarding(State(state): State<AppState>) -> ApiResult<Json<OnboardingState>> {
    let seen = get_parsed::<bool>(state.store.as_ref(), KEY_SEEN_ONBOARDING)
        .await?
        .unwrap_or(false);
    Ok(Json(OnboardingState { seen }))
}

/// PUT /api/settings/onboarding
pub async fn set_onboarding(
    State(state): State<AppState>,
    Json(request): Json<OnboardingState>,
) -> ApiResult<Json<OnboardingState>> {
    state
        .store
        .set(KEY_SEEN_ONBOARDING, if request.seen { "true" } else { "false" })
        .await?;
    Ok(Json(request))
}

/// GET /api/rate-limit
pub async fn get_rate_limit(State(state): State<AppState>) -> ApiResult<Json<RateStatus>> {
    Ok(Json(state.gate.status().await?))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/config", get(get_config))
        .route(
            "/api/settings/fast_mode",
            get(get_fast_mode).put(set_fast_mode).delete(clear_fast_mode),
        )
        .route(
            "/api/settings/onboarding",
            get(get_onboarding).put(set_onboarding),
        )
        .route("/api/rate-limit", get(get_rate_limit))
}
