use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use zerobounce_tools::test_support::{Behavior, Download, MockSdk};
use zerobounce_tools::{Mapping, ProviderClient, ToolRegistry, build_registry};

fn setup(sdk: MockSdk) -> (Arc<ProviderClient<MockSdk>>, ToolRegistry) {
    setup_with_tls(sdk, true)
}

fn setup_with_tls(sdk: MockSdk, verify_tls: bool) -> (Arc<ProviderClient<MockSdk>>, ToolRegistry) {
    let provider = Arc::new(ProviderClient::new(sdk, verify_tls));
    let registry = build_registry(Arc::clone(&provider));
    (provider, registry)
}

async fn call(registry: &ToolRegistry, name: &str, args: serde_json::Value) -> Mapping {
    registry.dispatch_json(name, args).await.unwrap()
}

#[tokio::test]
async fn validate_success_has_no_error() {
    let (provider, registry) = setup(MockSdk::default());

    let out = call(
        &registry,
        "validate_email",
        json!({"email": "jill@example.com", "ip_address": "99.110.204.1"}),
    )
    .await;

    assert!(!out.contains_key("error"));
    assert_eq!(out["address"], "jill@example.com");
    assert_eq!(out["status"], "valid");
    assert_eq!(
        provider.sdk().last_validate(),
        Some((
            "jill@example.com".to_string(),
            Some("99.110.204.1".to_string())
        ))
    );
}

#[tokio::test]
async fn provider_failure_is_error_mapping() {
    let (_, registry) = setup(
        MockSdk::default().with_behavior(Behavior::ApiError("Invalid API Key".into())),
    );

    for (name, args) in [
        ("validate_email", json!({"email": "jill@example.com"})),
        ("get_credits", json!({})),
        ("check_file_status", json!({"file_id": "abc123"})),
        ("delete_file", json!({"file_id": "abc123"})),
        (
            "guess_format",
            json!({"domain": "example.com", "first_name": "John"}),
        ),
    ] {
        let out = call(&registry, name, args).await;
        assert_eq!(out["error"], "Invalid API Key", "{name}");
        assert_eq!(out["error_type"], "ProviderError", "{name}");
    }
}

#[tokio::test]
async fn domain_search_never_calls_provider() {
    let (provider, registry) = setup(MockSdk::default());

    let out = call(&registry, "domain_search", json!({"domain": "example.com"})).await;

    assert_eq!(out["domain"], "example.com");
    assert_eq!(
        out["error"],
        "domain_search method is not available in the official SDK"
    );
    assert!(out["suggestion"].as_str().unwrap().contains("guess_format"));
    assert!(!out.contains_key("error_type"));
    assert_eq!(provider.sdk().calls(), 0);
}

#[tokio::test]
async fn upload_forwards_zero_for_unused_columns() {
    let (provider, registry) = setup(MockSdk::default());

    let out = call(
        &registry,
        "upload_file",
        json!({
            "file_path": "/data/list.csv",
            "email_column": 1,
            "first_name_column": 0,
            "last_name_column": -2,
        }),
    )
    .await;
    assert_eq!(out["success"], true);
    assert_eq!(out["file_id"], "abc123");

    let req = provider.sdk().last_upload().unwrap();
    assert_eq!(req.file_path, Path::new("/data/list.csv"));
    assert_eq!(req.email_address_column, 1);
    assert_eq!(req.first_name_column, 0);
    assert_eq!(req.last_name_column, 0);
    assert_eq!(req.gender_column, 0);
    assert_eq!(req.ip_address_column, 0);
    assert!(req.has_header_row);
    assert!(req.remove_duplicate);
    assert_eq!(req.return_url, None);
}

#[tokio::test]
async fn upload_rejects_bad_email_column_without_calling_provider() {
    let (provider, registry) = setup(MockSdk::default());

    for column in [0, -1] {
        let out = call(
            &registry,
            "upload_file",
            json!({"file_path": "/data/list.csv", "email_column": column}),
        )
        .await;
        assert_eq!(out["error_type"], "InvalidInput");
    }
    assert_eq!(provider.sdk().calls(), 0);
}

#[tokio::test]
async fn blank_required_arguments_are_invalid_input() {
    let (provider, registry) = setup(MockSdk::default());

    for (name, args) in [
        ("validate_email", json!({"email": "  "})),
        ("check_file_status", json!({"file_id": ""})),
        ("get_file", json!({"file_id": " "})),
        ("delete_file", json!({"file_id": ""})),
        ("domain_search", json!({"domain": ""})),
        ("guess_format", json!({"domain": "example.com", "first_name": ""})),
        ("upload_file", json!({"file_path": "", "email_column": 1})),
    ] {
        let out = call(&registry, name, args).await;
        assert_eq!(out["error_type"], "InvalidInput", "{name}");
    }
    assert_eq!(provider.sdk().calls(), 0);
}

#[tokio::test]
async fn get_file_reports_downloaded_file() {
    let (_, registry) = setup(MockSdk::default());

    let out = call(&registry, "get_file", json!({"file_id": "abc123"})).await;

    assert_eq!(out["success"], true);
    assert_eq!(out["file_id"], "abc123");
    assert!(out["file_size"].as_u64().unwrap() > 0);

    let path = out["local_file_path"].as_str().unwrap();
    assert!(Path::new(path).exists());
    assert!(path.ends_with(".csv"));
    assert!(out["message"].as_str().unwrap().contains(path));
    assert_eq!(out["sdk_response"]["success"], true);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn get_file_empty_or_missing_is_not_success() {
    for download in [Download::Empty, Download::Missing] {
        let (_, registry) = setup(MockSdk::default().with_download(download));

        let out = call(&registry, "get_file", json!({"file_id": "abc123"})).await;

        assert_ne!(out.get("success"), Some(&json!(true)));
        assert_eq!(out["file_id"], "abc123");
        assert_eq!(out["error"], "File download failed or file is empty");
        assert!(out.contains_key("local_file_path"));

        let _ = std::fs::remove_file(out["local_file_path"].as_str().unwrap());
    }
}

#[tokio::test]
async fn certificate_failure_with_verification_disabled_suggests_fix() {
    let (_, registry) = setup_with_tls(
        MockSdk::default()
            .with_behavior(Behavior::TlsError("invalid peer certificate: UnknownIssuer".into())),
        false,
    );

    let out = call(&registry, "validate_email", json!({"email": "jill@example.com"})).await;

    assert_eq!(out["error_type"], "SSLError");
    assert!(!out["suggestion"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn certificate_failure_with_verification_enabled_is_transport() {
    let (_, registry) = setup(
        MockSdk::default()
            .with_behavior(Behavior::TlsError("invalid peer certificate: Expired".into())),
    );

    let out = call(&registry, "get_credits", json!({})).await;

    assert_eq!(out["error_type"], "TransportError");
    assert!(!out.contains_key("suggestion"));
}

#[tokio::test]
async fn worker_panic_is_reported_not_propagated() {
    let (_, registry) = setup(MockSdk::default().with_behavior(Behavior::Panic));

    let out = call(&registry, "validate_email", json!({"email": "jill@example.com"})).await;

    assert_eq!(out["error_type"], "Exception");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_first_calls_both_complete() {
    let (provider, registry) = setup(MockSdk::default());

    let (a, b) = tokio::join!(
        registry.dispatch_json("get_credits", json!({})),
        registry.dispatch_json("validate_email", json!({"email": "jill@example.com"})),
    );

    assert_eq!(a.unwrap()["credits"], 1000);
    assert_eq!(b.unwrap()["status"], "valid");
    assert_eq!(provider.sdk().calls(), 2);
}

#[tokio::test]
async fn guess_format_forwards_name_parts() {
    let (provider, registry) = setup(MockSdk::default());

    let out = call(
        &registry,
        "guess_format",
        json!({"domain": "example.com", "first_name": "John", "last_name": "Doe"}),
    )
    .await;

    assert_eq!(out["email"], "john@example.com");
    let req = provider.sdk().last_guess().unwrap();
    assert_eq!(req.middle_name, "");
    assert_eq!(req.last_name, "Doe");
}
