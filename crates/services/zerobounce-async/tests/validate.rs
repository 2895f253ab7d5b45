use serial_test::serial;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerobounce_async::test_support::EnvGuard;
use zerobounce_async::types::GuessFormatRequest;
use zerobounce_async::{Client, ZeroBounceConfig, ZeroBounceError};

fn test_client(server: &MockServer) -> Client<ZeroBounceConfig> {
    let config = ZeroBounceConfig::new()
        .with_api_base(server.uri())
        .with_bulk_api_base(server.uri())
        .with_api_key("test-api-key");
    Client::with_config(config).unwrap()
}

fn mock_validate_response() -> serde_json::Value {
    serde_json::json!({
        "address": "flowerjill@aol.com",
        "status": "valid",
        "sub_status": "",
        "free_email": true,
        "did_you_mean": null,
        "account": "flowerjill",
        "domain": "aol.com",
        "domain_age_days": "9692",
        "active_in_days": "30",
        "smtp_provider": "yahoo",
        "mx_found": "true",
        "mx_record": "mx-aol.mail.gm0.yahoodns.net",
        "firstname": "Jill",
        "lastname": "Stein",
        "gender": "female",
        "country": "United States",
        "region": "Florida",
        "city": "West Palm Beach",
        "zipcode": "33401",
        "processed_at": "2017-04-01 02:48:02.592"
    })
}

#[tokio::test]
async fn validate_success_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(query_param("api_key", "test-api-key"))
        .and(query_param("email", "flowerjill@aol.com"))
        .and(query_param("ip_address", "99.110.204.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_validate_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .validation()
        .validate("flowerjill@aol.com", Some("99.110.204.1"))
        .await
        .unwrap();

    assert_eq!(resp.address, "flowerjill@aol.com");
    assert_eq!(resp.status, "valid");
    assert_eq!(resp.free_email, Some(true));
    assert_eq!(resp.smtp_provider.as_deref(), Some("yahoo"));
    assert_eq!(resp.mx_found, Some(serde_json::json!("true")));
    // unmodelled fields survive
    assert_eq!(resp.extra["active_in_days"], "30");
}

#[tokio::test]
async fn validate_without_ip_sends_empty_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(query_param("ip_address", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_validate_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .validation()
        .validate("flowerjill@aol.com", None)
        .await
        .unwrap();
    assert_eq!(resp.status, "valid");
}

#[tokio::test]
async fn error_field_in_200_body_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Invalid API Key or your account ran out of credits"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .validation()
        .validate("someone@example.com", None)
        .await
        .unwrap_err();

    match err {
        ZeroBounceError::Api(obj) => {
            assert_eq!(obj.status_code, Some(200));
            assert!(obj.message.contains("Invalid API Key"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_api_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/validate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .validation()
        .validate("someone@example.com", None)
        .await
        .unwrap_err();

    match err {
        ZeroBounceError::Api(obj) => assert_eq!(obj.status_code, Some(503)),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
#[serial(env)]
async fn missing_api_key_is_config_error() {
    let _guard = EnvGuard::remove("ZEROBOUNCE_API_KEY");

    let client = Client::with_config(
        ZeroBounceConfig::new().with_api_base("http://localhost:1234"),
    )
    .unwrap();

    let result = client.validation().validate("a@b.com", None).await;
    match result.unwrap_err() {
        ZeroBounceError::Config(msg) => assert!(msg.contains("ZEROBOUNCE_API_KEY")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let client = Client::with_config(
        ZeroBounceConfig::new()
            .with_api_base("http://127.0.0.1:9")
            .with_api_key("k"),
    )
    .unwrap();

    let err = client
        .validation()
        .validate("a@b.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ZeroBounceError::Reqwest(_)), "got {err:?}");
}

#[tokio::test]
async fn credits_parses_string_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getcredits"))
        .and(query_param("api_key", "test-api-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Credits": "2375323"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.account().credits().await.unwrap(), 2_375_323);
}

#[tokio::test]
async fn credits_minus_one_is_rejected_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getcredits"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Credits": "-1"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.account().credits().await.unwrap_err();
    assert!(matches!(err, ZeroBounceError::Api(_)), "got {err:?}");
}

#[tokio::test]
async fn guess_format_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guessformat"))
        .and(query_param("domain", "example.com"))
        .and(query_param("first_name", "John"))
        .and(query_param("middle_name", ""))
        .and(query_param("last_name", "Doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "email": "john.doe@example.com",
            "domain": "example.com",
            "format": "first.last",
            "status": "valid",
            "sub_status": "",
            "confidence": "high",
            "did_you_mean": "",
            "failure_reason": "",
            "other_domain_formats": [
                {"format": "first_last", "confidence": "medium"},
                {"format": "flast", "confidence": "low"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = GuessFormatRequest::new("example.com", "John").with_last_name("Doe");
    let resp = client.email_finder().guess_format(&req).await.unwrap();

    assert_eq!(resp.email.as_deref(), Some("john.doe@example.com"));
    assert_eq!(resp.format.as_deref(), Some("first.last"));
    assert_eq!(resp.other_domain_formats.len(), 2);
    assert_eq!(resp.other_domain_formats[1].format, "flast");
}
