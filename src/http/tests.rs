//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plain_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("ride-price-collector/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-API-KEY", "key")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-API-KEY"),
        Some(&"key".to_string())
    );
}

#[test]
fn test_debug_hides_header_values() {
    let config = HttpClientConfig::builder()
        .header("X-API-SECRET", "do-not-print")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("X-API-SECRET"));
    assert!(!debug.contains("do-not-print"));
}

#[tokio::test]
async fn test_post_json_sends_body_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(header("X-API-KEY", "secret123"))
        .and(header("user-agent", HttpClientConfig::default().user_agent.as_str()))
        .and(body_json(json!({"name": "test"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 123})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-API-KEY", "secret123")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let data: serde_json::Value = client
        .post_json(
            &format!("{}/api/items", mock_server.uri()),
            &json!({"name": "test"}),
        )
        .await
        .unwrap();

    assert_eq!(data["id"], 123);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = plain_client()
        .post_json::<serde_json::Value>(&format!("{}/api/flaky", mock_server.uri()), &json!({}))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_client_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/denied"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let err = plain_client()
        .post_json::<serde_json::Value>(&format!("{}/api/denied", mock_server.uri()), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_post_json_invalid_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = plain_client()
        .post_json::<serde_json::Value>(&format!("{}/api/html", mock_server.uri()), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_connection_refused() {
    // nothing listens on port 1
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(2))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .post_json::<serde_json::Value>("http://127.0.0.1:1/", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_invalid_url() {
    let err = plain_client()
        .post_json::<serde_json::Value>("not a url", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}
