use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when using the ZeroBounce API client
#[derive(Debug, Error)]
pub enum ZeroBounceError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// TLS certificate validation failed while connecting
    #[error("TLS certificate error: {0}")]
    Tls(String),

    /// API error returned by ZeroBounce
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Local file I/O error (upload source or download target)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// API error reported by ZeroBounce
///
/// ZeroBounce reports most failures with a 200 status and an `error` or
/// `message` field in the body, so `status_code` is frequently `200`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) if !(200..300).contains(&code) => {
                write!(f, "{} (http {code})", self.message)
            }
            _ => f.write_str(&self.message),
        }
    }
}

impl ZeroBounceError {
    /// Builds an API error from a status and message
    #[must_use]
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api(ApiErrorObject {
            status_code: Some(status.as_u16()),
            message: message.into(),
        })
    }
}

/// Classifies a transport error, splitting certificate failures out of the generic case
#[must_use]
pub fn map_transport(e: reqwest::Error) -> ZeroBounceError {
    match certificate_failure(&e) {
        Some(detail) => ZeroBounceError::Tls(detail),
        None => ZeroBounceError::Reqwest(e),
    }
}

// reqwest does not expose TLS failures as a kind; walk the source chain instead.
fn certificate_failure(e: &reqwest::Error) -> Option<String> {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
    while let Some(err) = source {
        let text = err.to_string();
        let lc = text.to_lowercase();
        if lc.contains("certificate") || lc.contains("unknownissuer") {
            return Some(text);
        }
        source = err.source();
    }
    None
}

/// Maps a serde deserialization error to a `ZeroBounceError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> ZeroBounceError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    ZeroBounceError::Serde(format!("{e}: {snippet}"))
}

/// Looks for a ZeroBounce failure payload inside an otherwise successful response
///
/// Failures show up as `{"error": "..."}`, or `{"success": false, "message": ...}`
/// where `message` may be a string or a list of strings.
#[must_use]
pub fn api_error_in_body(status: StatusCode, body: &Value) -> Option<ZeroBounceError> {
    let obj = body.as_object()?;

    if let Some(msg) = obj.get("error").and_then(Value::as_str)
        && !msg.trim().is_empty()
    {
        return Some(ZeroBounceError::api(status, msg));
    }

    if obj.get("success").and_then(Value::as_bool) == Some(false) {
        let message = match obj.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
            _ => "request was not successful".to_string(),
        };
        return Some(ZeroBounceError::api(status, message));
    }

    None
}

/// Deserializes an API error from a non-success response body
///
/// Attempts to parse the body as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> ZeroBounceError {
    if let Ok(value) = serde_json::from_slice::<Value>(body)
        && let Some(err) = api_error_in_body(status, &value)
    {
        return err;
    }

    // Server may return plain text or HTML on 5xx; cap body to avoid log/memory bloat
    let text = String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned();
    let message = if text.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text
    };
    ZeroBounceError::api(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_field_is_api_error() {
        let body = json!({"error": "Invalid API key or your account ran out of credits"});
        let err = api_error_in_body(StatusCode::OK, &body).unwrap();
        match err {
            ZeroBounceError::Api(obj) => {
                assert_eq!(obj.status_code, Some(200));
                assert!(obj.message.contains("Invalid API key"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unsuccessful_message_list_is_joined() {
        let body = json!({"success": false, "message": ["File not found", "Check file_id"]});
        let err = api_error_in_body(StatusCode::OK, &body).unwrap();
        assert_eq!(err.to_string(), "API error: File not found; Check file_id");
    }

    #[test]
    fn successful_body_is_not_an_error() {
        let body = json!({"success": true, "message": "File Accepted", "file_id": "abc"});
        assert!(api_error_in_body(StatusCode::OK, &body).is_none());

        // empty error strings are ignored
        let body = json!({"address": "a@b.com", "error": ""});
        assert!(api_error_in_body(StatusCode::OK, &body).is_none());
    }

    #[test]
    fn plain_text_5xx_is_captured() {
        let err = deserialize_api_error(StatusCode::BAD_GATEWAY, b"upstream unavailable");
        assert_eq!(
            err.to_string(),
            "API error: upstream unavailable (http 502)"
        );
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        let err = deserialize_api_error(StatusCode::UNAUTHORIZED, b"");
        assert!(err.to_string().contains("Unauthorized"));
    }
}
