//! Destination catalog and per-destination content

use crate::services::{EnrichedContent, ViewSlot};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lakbay_quiz::destination::{catalog, find};
use lakbay_quiz::{Activity, Destination};
use serde::Deserialize;

/// GET /api/destinations
pub async fn list_destinations() -> Json<&'static [Destination]> {
    Json(catalog())
}

/// GET /api/destinations/:id
pub async fn get_destination(Path(id): Path<String>) -> ApiResult<Json<&'static Destination>> {
    find(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown destination: {}", id)))
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    /// View slot this result is for: "current" or "next"
    #[serde(default)]
    pub view: Option<String>,
    /// Activity used to tailor the description
    #[serde(default)]
    pub activity: Option<String>,
}

/// GET /api/destinations/:id/content?view=&activity=
///
/// Runs the content pipeline. With `view`, a request that is overtaken by
/// a newer one for the same slot answers 204 instead of its stale result.
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ContentQuery>,
) -> ApiResult<Response> {
    let destination =
        find(&id).ok_or_else(|| ApiError::NotFound(format!("Unknown destination: {}", id)))?;

    let activity = match query.activity.as_deref().map(str::trim) {
        None | Some("") => destination.activities.first().copied(),
        Some(raw) => Some(
            raw.parse::<Activity>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
    };
    let activity_hint = activity.map(|a| a.as_str()).unwrap_or("sightseeing");

    let slot = match query.view.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<ViewSlot>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
    };
    let ticket = slot.map(|slot| state.views.begin(slot));

    let content: EnrichedContent = state.resolver.resolve(destination, activity_hint).await;

    if let Some(ticket) = ticket {
        if !state.views.is_current(&ticket) {
            tracing::debug!(
                destination = %destination.id,
                slot = ticket.slot().as_str(),
                "Discarding superseded content"
            );
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
    }

    Ok(Json(content).into_response())
}

/// Build destination routes
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/api/destinations", get(list_destinations))
        .route("/api/destinations/:id", get(get_destination))
        .route("/api/destinations/:id/content", get(get_content))
}
