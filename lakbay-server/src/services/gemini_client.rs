//! Gemini description client
//!
//! Asks the model for a short destination blurb tuned to the traveler's
//! activity, returned as JSON so the best-months field can be split out.

use crate::types::{ProviderError, TextDescription, TextProvider};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.0-flash";
const USER_AGENT: &str = concat!("Lakbay/", env!("CARGO_PKG_VERSION"));

/// Gemini client errors
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API key not configured")]
    MissingApiKey,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Model returned no usable text")]
    EmptyResponse,
}

impl From<GeminiError> for ProviderError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => ProviderError::NotConfigured("gemini"),
            GeminiError::ApiError(429, _) => ProviderError::RateLimited("gemini"),
            other => ProviderError::Upstream {
                provider: "gemini",
                message: other.to_string(),
            },
        }
    }
}

/// JSON object the prompt asks the model to produce
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedDescription {
    description: String,
    #[serde(default)]
    best_months_to_visit: Option<String>,
}

/// Gemini generateContent client
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeminiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: GEMINI_MODEL.to_string(),
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a description for a destination and activity
    pub async fn generate(
        &self,
        destination_name: &str,
        activity_hint: &str,
    ) -> Result<TextDescription, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(destination_name, activity_hint) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.7
            }
        });

        tracing::debug!(
            destination = destination_name,
            activity = activity_hint,
            model = %self.model,
            "Requesting Gemini description"
        );

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError(status.as_u16(), error_text));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| GeminiError::ParseError(e.to_string()))?;

        let text = candidate_text(&data).ok_or(GeminiError::EmptyResponse)?;
        parse_generated(&text)
    }
}

fn build_prompt(destination_name: &str, activity_hint: &str) -> String {
    format!(
        "Write a vivid two-sentence travel description of {destination}, Philippines \
         for a traveler who enjoys {activity}. Respond with a JSON object with keys \
         \"description\" (string) and \"bestMonthsToVisit\" (short string such as \
         \"November to May\").",
        destination = destination_name,
        activity = activity_hint.replace('_', " "),
    )
}

/// Concatenated text parts of the first candidate
fn candidate_text(data: &Value) -> Option<String> {
    let parts = data["candidates"].get(0)?["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse the model's JSON, tolerating a Markdown code fence around it
fn parse_generated(text: &str) -> Result<TextDescription, GeminiError> {
    let stripped = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let generated: GeneratedDescription =
        serde_json::from_str(stripped).map_err(|e| GeminiError::ParseError(e.to_string()))?;

    let description = generated.description.trim();
    if description.is_empty() {
        return Err(GeminiError::EmptyResponse);
    }

    Ok(TextDescription {
        description: description.to_string(),
        best_months_to_visit: generated
            .best_months_to_visit
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
    })
}

#[async_trait]
impl TextProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn describe(
        &self,
        destination_name: &str,
        activity_hint: &str,
    ) -> Result<TextDescription, ProviderError> {
        Ok(self.generate(destination_name, activity_hint).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse_generated(
            r#"{"description": "Powdery sand and sunsets.", "bestMonthsToVisit": "November to May"}"#,
        )
        .unwrap();

        assert_eq!(parsed.description, "Powdery sand and sunsets.");
        assert_eq!(parsed.best_months_to_visit.as_deref(), Some("November to May"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let parsed = parse_generated("```json\n{\"description\": \"Rice terraces.\"}\n```").unwrap();

        assert_eq!(parsed.description, "Rice terraces.");
        assert_eq!(parsed.best_months_to_visit, None);
    }

    #[test]
    fn test_blank_description_is_empty_response() {
        let result = parse_generated(r#"{"description": "   "}"#);
        assert!(matches!(result, Err(GeminiError::EmptyResponse)));
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let data = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"description\":"}, {"text": " \"x\"}"}]}
            }]
        });

        assert_eq!(candidate_text(&data).as_deref(), Some("{\"description\": \"x\"}"));
        assert_eq!(candidate_text(&json!({"candidates": []})), None);
    }

    #[test]
    fn test_prompt_mentions_destination_and_activity() {
        let prompt = build_prompt("Siargao", "island_hopping");
        assert!(prompt.contains("Siargao"));
        assert!(prompt.contains("island hopping"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = GeminiClient::with_base_url(None, "http://127.0.0.1:9").unwrap();
        let result = client.generate("Boracay", "swimming").await;
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }
}
