//! Error types for lakbay-server

use crate::types::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream provider failed (502)
    #[error("Upstream error: {0}")]
    BadGateway(String),

    /// Upstream provider asked us to slow down (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider disabled for lack of credentials (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// lakbay-common error
    #[error("Common error: {0}")]
    Common(#[from] lakbay_common::Error),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => ApiError::Unavailable(err.to_string()),
            ProviderError::RateLimited(_) => ApiError::RateLimited(err.to_string()),
            ProviderError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ProviderError::Upstream { .. } => ApiError::BadGateway(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED", msg)
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_status_mapping() {
        let cases = [
            (ProviderError::NotConfigured("gemini"), StatusCode::SERVICE_UNAVAILABLE),
            (ProviderError::RateLimited("unsplash"), StatusCode::TOO_MANY_REQUESTS),
            (
                ProviderError::NotFound {
                    provider: "wikipedia",
                    query: "Atlantis".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ProviderError::Upstream {
                    provider: "unsplash",
                    message: "boom".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
