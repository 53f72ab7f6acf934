//! Wikipedia REST summary client
//!
//! Fetches the lead-paragraph extract for a destination page. Disambiguation
//! pages and empty extracts count as "nothing found".

use crate::types::{ProviderError, TextDescription, TextProvider};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1";
const USER_AGENT: &str = concat!("Lakbay/", env!("CARGO_PKG_VERSION"));

/// Wikipedia client errors
#[derive(Debug, Error)]
pub enum WikipediaError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("No summary for {0:?}")]
    NotFound(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl From<WikipediaError> for ProviderError {
    fn from(err: WikipediaError) -> Self {
        match err {
            WikipediaError::NotFound(query) => ProviderError::NotFound {
                provider: "wikipedia",
                query,
            },
            other => ProviderError::Upstream {
                provider: "wikipedia",
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    page_type: String,
    #[serde(default)]
    extract: String,
}

/// Wikipedia REST API client
pub struct WikipediaClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl WikipediaClient {
    pub fn new() -> Result<Self, WikipediaError> {
        Self::with_base_url(WIKIPEDIA_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, WikipediaError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WikipediaError::NetworkError(e.to_string()))?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| WikipediaError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// `{base}/page/summary/{Title_With_Underscores}`, percent-encoded
    fn summary_url(&self, title: &str) -> Result<Url, WikipediaError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WikipediaError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["page", "summary", &title.trim().replace(' ', "_")]);
        Ok(url)
    }

    /// Fetch the summary extract for a page title
    pub async fn summary(&self, title: &str) -> Result<String, WikipediaError> {
        let url = self.summary_url(title)?;

        tracing::debug!(title = title, "Querying Wikipedia summary");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| WikipediaError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WikipediaError::NotFound(title.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WikipediaError::ApiError(status.as_u16(), error_text));
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| WikipediaError::ParseError(e.to_string()))?;

        let extract = summary.extract.trim();
        if summary.page_type == "disambiguation" || extract.is_empty() {
            return Err(WikipediaError::NotFound(title.to_string()));
        }

        Ok(extract.to_string())
    }
}

#[async_trait]
impl TextProvider for WikipediaClient {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    /// The activity hint is unused; summaries are per page
    async fn describe(
        &self,
        destination_name: &str,
        _activity_hint: &str,
    ) -> Result<TextDescription, ProviderError> {
        let description = self.summary(destination_name).await?;
        Ok(TextDescription {
            description,
            best_months_to_visit: None,
        })
    }
}
