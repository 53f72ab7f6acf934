//! Provider clients against local mock servers

use lakbay_server::services::{
    GeminiClient, GeminiError, ImageCache, ImageProxy, UnsplashClient, UnsplashError,
    WikipediaClient, WikipediaError,
};
use lakbay_server::types::{PhotoProvider, ProviderError, TextProvider};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_unsplash_search_maps_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(header("authorization", "Client-ID test-key"))
        .and(query_param("query", "Boracay White Beach"))
        .and(query_param("per_page", "1"))
        .and(query_param("orientation", "landscape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "results": [{
                "id": "abc123",
                "urls": {"regular": "https://images.unsplash.com/photo-abc123"},
                "alt_description": "white sand at sunset",
                "user": {
                    "name": "Maria Santos",
                    "username": "msantos",
                    "links": {"html": "https://unsplash.com/@msantos"}
                },
                "links": {"download_location": format!("{}/photos/abc123/download", server.uri())}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = UnsplashClient::with_base_url(Some("test-key".to_string()), server.uri()).unwrap();
    let photos = client.search("Boracay White Beach", 1).await.unwrap();

    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].id, "abc123");
    assert_eq!(photos[0].photographer_name, "Maria Santos");
    assert_eq!(photos[0].alt_text.as_deref(), Some("white sand at sunset"));
    server.verify().await;
}

#[tokio::test]
async fn test_unsplash_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = UnsplashClient::with_base_url(Some("k".to_string()), server.uri()).unwrap();

    let result = client.search_photos("Sagada", 1).await;
    assert!(matches!(result, Err(UnsplashError::ApiError(503, ref body)) if body == "maintenance"));
}

#[tokio::test]
async fn test_unsplash_download_tracking_hits_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos/abc123/download"))
        .and(header("authorization", "Client-ID k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = UnsplashClient::with_base_url(Some("k".to_string()), server.uri()).unwrap();
    let location = format!("{}/photos/abc123/download", server.uri());

    client.notify_used(&location).await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_wikipedia_summary_extract() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/summary/El_Nido"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "standard",
            "title": "El Nido",
            "extract": "El Nido is a municipality in Palawan."
        })))
        .mount(&server)
        .await;

    let client = WikipediaClient::with_base_url(&server.uri()).unwrap();
    let text = client.describe("El Nido", "diving").await.unwrap();

    assert_eq!(text.description, "El Nido is a municipality in Palawan.");
    assert_eq!(text.best_months_to_visit, None);
}

#[tokio::test]
async fn test_wikipedia_missing_and_disambiguation_are_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/summary/Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/summary/Mercury"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "disambiguation",
            "extract": "Mercury may refer to:"
        })))
        .mount(&server)
        .await;

    let client = WikipediaClient::with_base_url(&server.uri()).unwrap();

    assert!(matches!(
        client.summary("Atlantis").await,
        Err(WikipediaError::NotFound(_))
    ));
    assert!(matches!(
        client.describe("Mercury", "").await,
        Err(ProviderError::NotFound { provider: "wikipedia", .. })
    ));
}

#[tokio::test]
async fn test_gemini_generates_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "text": "{\"description\": \"Surf capital of the Philippines.\", \"bestMonthsToVisit\": \"August to November\"}"
                    }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(Some("g-key".to_string()), server.uri()).unwrap();
    let text = client.generate("Siargao", "surfing").await.unwrap();

    assert_eq!(text.description, "Surf capital of the Philippines.");
    assert_eq!(text.best_months_to_visit.as_deref(), Some("August to November"));
    server.verify().await;
}

#[tokio::test]
async fn test_gemini_without_candidates_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(Some("g-key".to_string()), server.uri()).unwrap();

    assert!(matches!(
        client.generate("Siargao", "surfing").await,
        Err(GeminiError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_image_proxy_caches_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/webp")
                .set_body_bytes(vec![1u8, 2, 3]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let proxy = ImageProxy::with_allowed_prefix(
        ImageCache::new(4, Duration::from_secs(60)),
        format!("{}/", server.uri()),
    )
    .unwrap();
    let url = format!("{}/photo-1", server.uri());
    assert!(proxy.is_allowed(&url));

    let first = proxy.fetch(&url).await.unwrap();
    let second = proxy.fetch(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.content_type, "image/webp");
    assert_eq!(&first.bytes[..], &[1u8, 2, 3]);
    assert_eq!(proxy.cache().len(), 1);
    server.verify().await;
}
