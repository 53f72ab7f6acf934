//! Quiz endpoints
//!
//! Questions, dependent activity options, personality profiles, and the
//! recommendation call itself. All of it is pure computation over the
//! built-in catalog.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, Query},
    routing::{get, post},
    Json, Router,
};
use lakbay_quiz::destination::catalog;
use lakbay_quiz::profiles::{all_profiles, profile};
use lakbay_quiz::questions::{questions, Question};
use lakbay_quiz::taxonomy::activities_for;
use lakbay_quiz::{
    recommend, Activity, AnswerVector, Environment, PersonalityId, PersonalityProfile,
    Recommendation, Vibe,
};
use serde::{Deserialize, Serialize};

/// GET /api/questions
pub async fn list_questions() -> Json<&'static [Question]> {
    Json(questions())
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub environment: String,
    #[serde(default)]
    pub vibe: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityOption {
    pub value: Activity,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub environment: Environment,
    pub vibe: Option<Vibe>,
    pub activities: Vec<ActivityOption>,
}

/// GET /api/activities?environment=&vibe=
///
/// Options for the activity question given the environment and vibe
/// answers. Omitting `vibe` lists every vibe's activities.
pub async fn list_activities(
    Query(query): Query<ActivitiesQuery>,
) -> ApiResult<Json<ActivitiesResponse>> {
    let environment: Environment = query
        .environment
        .parse()
        .map_err(|e: lakbay_quiz::ParseError| ApiError::BadRequest(e.to_string()))?;

    let vibe = match query.vibe.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<Vibe>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
    };

    let activities = activities_for(environment, vibe)
        .into_iter()
        .map(|activity| ActivityOption {
            value: activity,
            label: activity.label(),
        })
        .collect();

    Ok(Json(ActivitiesResponse {
        environment,
        vibe,
        activities,
    }))
}

/// GET /api/personalities
pub async fn list_personalities() -> Json<&'static [PersonalityProfile]> {
    Json(all_profiles())
}

/// GET /api/personalities/:id
pub async fn get_personality(
    Path(id): Path<String>,
) -> ApiResult<Json<&'static PersonalityProfile>> {
    let id: PersonalityId = id
        .parse()
        .map_err(|e: lakbay_quiz::ParseError| ApiError::NotFound(e.to_string()))?;
    Ok(Json(profile(id)))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub answers: AnswerVector,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// Profile of the primary personality, when one was classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'static PersonalityProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_hint: Option<Activity>,
}

/// POST /api/recommendations
pub async fn create_recommendation(
    Json(request): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let recommendation = recommend(&request.answers, catalog());

    tracing::debug!(
        answers = request.answers.len(),
        personality = ?recommendation.personality.as_ref().map(|p| p.primary),
        matches = recommendation.destinations.len(),
        "Recommendation computed"
    );

    let profile = recommendation
        .personality
        .as_ref()
        .map(|p| profile(p.primary));
    let activity_hint = recommendation.activity_hint();

    Json(RecommendationResponse {
        recommendation,
        profile,
        activity_hint,
    })
}

/// Build quiz routes
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/api/questions", get(list_questions))
        .route("/api/activities", get(list_activities))
        .route("/api/personalities", get(list_personalities))
        .route("/api/personalities/:id", get(get_personality))
        .route("/api/recommendations", post(create_recommendation))
}
