//! End-to-end: tools over the real HTTP vendor client against a mock server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerobounce_tools::{Settings, ToolRegistry, ZeroBounceProvider, build_registry};

fn registry_for(server: &MockServer) -> ToolRegistry {
    let settings = Settings::new("test-api-key")
        .unwrap()
        .with_api_base(server.uri())
        .with_bulk_api_base(server.uri());
    let provider = ZeroBounceProvider::from_settings(&settings).unwrap();
    build_registry(Arc::new(provider))
}

#[tokio::test]
async fn credits_flow_through_to_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getcredits"))
        .and(query_param("api_key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Credits": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch_json("get_credits", json!({}))
        .await
        .unwrap();

    assert_eq!(out["credits"], 42);
}

#[tokio::test]
async fn provider_error_body_becomes_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Invalid API Key or your account ran out of credits"
        })))
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch_json("validate_email", json!({"email": "jill@example.com"}))
        .await
        .unwrap();

    assert_eq!(out["error_type"], "ProviderError");
    assert!(out["error"].as_str().unwrap().contains("Invalid API Key"));
}

#[tokio::test]
async fn get_file_downloads_to_temp_csv() {
    let server = MockServer::start().await;
    let body = "\"email\",\"ZB Status\"\n\"jill@example.com\",\"valid\"\n";

    Mock::given(method("GET"))
        .and(path("/getfile"))
        .and(query_param("file_id", "abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_string(body),
        )
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch_json("get_file", json!({"file_id": "abc123"}))
        .await
        .unwrap();

    assert_eq!(out["success"], true);
    assert_eq!(out["file_size"], body.len() as u64);
    let local = out["local_file_path"].as_str().unwrap();
    assert_eq!(std::fs::read_to_string(local).unwrap(), body);
    std::fs::remove_file(local).unwrap();
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let settings = Settings::new("test-api-key")
        .unwrap()
        .with_api_base("http://127.0.0.1:9");
    let provider = ZeroBounceProvider::from_settings(&settings).unwrap();
    let registry = build_registry(Arc::new(provider));

    let out = registry
        .dispatch_json("get_credits", json!({}))
        .await
        .unwrap();

    assert_eq!(out["error_type"], "TransportError");
}
