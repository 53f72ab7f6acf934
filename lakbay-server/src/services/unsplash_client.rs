//! Unsplash API client
//!
//! Photo search plus the download-tracking ping Unsplash requires whenever a
//! photo is shown. Requests are paced locally with `governor` so a burst of
//! destination cards cannot exhaust the hourly demo quota.

use crate::types::{Photo, PhotoProvider, ProviderError};
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
const USER_AGENT: &str = concat!("Lakbay/", env!("CARGO_PKG_VERSION"));
/// Unsplash demo applications get 50 requests per hour
const REQUESTS_PER_HOUR: u32 = 50;
/// Largest page the search endpoint is asked for
pub const MAX_SEARCH_COUNT: u8 = 10;

/// Unsplash client errors
#[derive(Debug, Error)]
pub enum UnsplashError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Access key not configured")]
    MissingAccessKey,

    #[error("Local request budget exhausted")]
    RateLimitExceeded,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Download location outside Unsplash API: {0}")]
    ForeignDownloadLocation(String),
}

impl From<UnsplashError> for ProviderError {
    fn from(err: UnsplashError) -> Self {
        match err {
            UnsplashError::MissingAccessKey => ProviderError::NotConfigured("unsplash"),
            UnsplashError::RateLimitExceeded | UnsplashError::ApiError(429, _) => {
                ProviderError::RateLimited("unsplash")
            }
            other => ProviderError::Upstream {
                provider: "unsplash",
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    alt_description: Option<String>,
    user: UnsplashUser,
    links: Option<PhotoLinks>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
    username: String,
    links: UserLinks,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    download_location: Option<String>,
}

impl From<UnsplashPhoto> for Photo {
    fn from(p: UnsplashPhoto) -> Self {
        Photo {
            id: p.id,
            url: p.urls.regular,
            alt_text: p.alt_description,
            photographer_name: p.user.name,
            photographer_username: p.user.username,
            photographer_profile_url: p.user.links.html,
            download_location: p.links.and_then(|l| l.download_location),
        }
    }
}

/// Unsplash API client
pub struct UnsplashClient {
    http_client: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
    rate_limiter: RateLimiter<
        governor::state::direct::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl UnsplashClient {
    /// Client against the public API; `None` disables every call
    pub fn new(access_key: Option<String>) -> Result<Self, UnsplashError> {
        Self::with_base_url(access_key, UNSPLASH_BASE_URL)
    }

    pub fn with_base_url(
        access_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, UnsplashError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| UnsplashError::NetworkError(e.to_string()))?;

        let per_hour = NonZeroU32::new(REQUESTS_PER_HOUR).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key,
            rate_limiter: RateLimiter::direct(Quota::per_hour(per_hour)),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }

    fn authorization(&self) -> Result<String, UnsplashError> {
        self.access_key
            .as_deref()
            .map(|key| format!("Client-ID {}", key))
            .ok_or(UnsplashError::MissingAccessKey)
    }

    /// Drop the request when the hourly budget is spent instead of queuing it
    fn acquire(&self) -> Result<(), UnsplashError> {
        self.rate_limiter
            .check()
            .map_err(|_| UnsplashError::RateLimitExceeded)
    }

    /// Search landscape photos
    pub async fn search_photos(&self, query: &str, count: u8) -> Result<Vec<Photo>, UnsplashError> {
        let authorization = self.authorization()?;
        self.acquire()?;

        let count = count.clamp(1, MAX_SEARCH_COUNT);
        let per_page = count.to_string();

        tracing::debug!(query = query, count = count, "Querying Unsplash search");

        let response = self
            .http_client
            .get(format!("{}/search/photos", self.base_url))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ])
            .send()
            .await
            .map_err(|e| UnsplashError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UnsplashError::ApiError(status.as_u16(), error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| UnsplashError::ParseError(e.to_string()))?;

        tracing::debug!(query = query, results = body.results.len(), "Unsplash search complete");

        Ok(body.results.into_iter().map(Photo::from).collect())
    }

    /// Ping a photo's download-tracking endpoint
    ///
    /// Only URLs under the configured API base are accepted; this endpoint
    /// is reachable from clients and must not become an open relay.
    pub async fn track_download(&self, download_location: &str) -> Result<(), UnsplashError> {
        if !download_location.starts_with(&format!("{}/", self.base_url)) {
            return Err(UnsplashError::ForeignDownloadLocation(
                download_location.to_string(),
            ));
        }
        let authorization = self.authorization()?;

        let response = self
            .http_client
            .get(download_location)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| UnsplashError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UnsplashError::ApiError(status.as_u16(), error_text));
        }

        tracing::debug!(download_location = download_location, "Unsplash download tracked");
        Ok(())
    }
}

#[async_trait]
impl PhotoProvider for UnsplashClient {
    async fn search(&self, query: &str, count: u8) -> Result<Vec<Photo>, ProviderError> {
        Ok(self.search_photos(query, count).await?)
    }

    async fn notify_used(&self, download_location: &str) -> Result<(), ProviderError> {
        Ok(self.track_download(download_location).await?)
    }
}
