//! Provider pass-through endpoints
//!
//! Keep API keys server-side: clients call these instead of the providers.

use crate::services::unsplash_client::MAX_SEARCH_COUNT;
use crate::types::{Photo, ProviderError, TextDescription};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Log and remember a provider failure, then convert it for the response
async fn provider_failure(state: &AppState, err: ProviderError) -> ApiError {
    if matches!(err, ProviderError::Upstream { .. }) {
        tracing::warn!("Provider call failed: {}", err);
        state.record_error(err.to_string()).await;
    }
    ApiError::from(err)
}

fn require(value: Option<String>, name: &str) -> ApiResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required parameter: {}", name)))
}

#[derive(Debug, Deserialize)]
pub struct PhotoSearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub count: Option<u8>,
}

/// GET /api/unsplash/search?query=&count=
pub async fn search_photos(
    State(state): State<AppState>,
    Query(params): Query<PhotoSearchQuery>,
) -> ApiResult<Json<Vec<Photo>>> {
    let query = require(params.query, "query")?;
    let count = params.count.unwrap_or(1);
    if !(1..=MAX_SEARCH_COUNT).contains(&count) {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {}",
            MAX_SEARCH_COUNT
        )));
    }

    match state.providers.photos.search(&query, count).await {
        Ok(photos) => Ok(Json(photos)),
        Err(e) => Err(provider_failure(&state, e).await),
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub download_location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
}

/// POST /api/unsplash/download
pub async fn track_download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> ApiResult<Json<DownloadResponse>> {
    let location = require(request.download_location, "download_location")?;

    match state.providers.photos.notify_used(&location).await {
        Ok(()) => Ok(Json(DownloadResponse { success: true })),
        Err(e) => Err(provider_failure(&state, e).await),
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// GET /api/image?url=
///
/// Serves Unsplash CDN images through the cache.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(params): Query<ImageQuery>,
) -> ApiResult<Response> {
    let url = require(params.url, "url")?;
    if !state.images.is_allowed(&url) {
        return Err(ApiError::BadRequest(format!("URL not allowed: {}", url)));
    }

    let image = match state.images.fetch(&url).await {
        Ok(image) => image,
        Err(e) => return Err(provider_failure(&state, e).await),
    };

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        image.bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct WikipediaQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
}

/// GET /api/wikipedia?name=&activity=
pub async fn wikipedia_description(
    State(state): State<AppState>,
    Query(params): Query<WikipediaQuery>,
) -> ApiResult<Json<TextDescription>> {
    let name = require(params.name, "name")?;
    let activity = params.activity.unwrap_or_default();

    match state.providers.wikipedia.describe(&name, &activity).await {
        Ok(text) => Ok(Json(text)),
        Err(e) => Err(provider_failure(&state, e).await),
    }
}

#[derive(Debug, Deserialize)]
pub struct GeminiRequest {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
}

/// POST /api/gemini
pub async fn gemini_description(
    State(state): State<AppState>,
    Json(request): Json<GeminiRequest>,
) -> ApiResult<Json<TextDescription>> {
    let destination = require(request.destination, "destination")?;
    let activity = request
        .activity
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "sightseeing".to_string());

    match state.providers.gemini.describe(&destination, &activity).await {
        Ok(text) => Ok(Json(text)),
        Err(e) => Err(provider_failure(&state, e).await),
    }
}

/// Build provider pass-through routes
pub fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/unsplash/search", get(search_photos))
        .route("/api/unsplash/download", post(track_download))
        .route("/api/image", get(proxy_image))
        .route("/api/wikipedia", get(wikipedia_description))
        .route("/api/gemini", post(gemini_description))
}
