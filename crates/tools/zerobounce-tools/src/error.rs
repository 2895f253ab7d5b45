//! Failure taxonomy shared by the provider client and the tools.
//!
//! Every failure a tool can report is a [`ToolFailure`] carrying one [`ErrorKind`].
//! The mapping a caller sees is produced by [`ToolFailure::into_mapping`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use zerobounce_async::ZeroBounceError;

use crate::shape::Mapping;

/// Hint attached to certificate failures while verification is disabled.
pub const SSL_SUGGESTION: &str =
    "Try running with SSL verification enabled or check your system's SSL configuration";

/// Closed set of failure categories reported as `error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidInput,
    Provider,
    Ssl,
    Transport,
    Unknown,
}

impl ErrorKind {
    /// Wire name used in the `error_type` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "ConfigurationError",
            Self::InvalidInput => "InvalidInput",
            Self::Provider => "ProviderError",
            Self::Ssl => "SSLError",
            Self::Transport => "TransportError",
            Self::Unknown => "Exception",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed operation, as reported to tool callers.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind}: {message}")]
pub struct ToolFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
    /// Extra fields merged into the rendered mapping (e.g. `file_id`).
    pub context: Mapping,
}

impl ToolFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            context: Mapping::new(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Classifies a vendor client error.
    ///
    /// `verify_tls` is the verification mode the failing client was built with;
    /// certificate failures only earn a suggestion when verification was off.
    pub fn translate(err: ZeroBounceError, verify_tls: bool) -> Self {
        match err {
            ZeroBounceError::Api(obj) => Self::new(ErrorKind::Provider, obj.to_string()),
            ZeroBounceError::Tls(detail) if !verify_tls => Self::new(
                ErrorKind::Ssl,
                format!("SSL certificate verification failed: {detail}"),
            )
            .with_suggestion(SSL_SUGGESTION),
            e @ (ZeroBounceError::Tls(_) | ZeroBounceError::Reqwest(_)) => {
                Self::new(ErrorKind::Transport, e.to_string())
            }
            ZeroBounceError::Config(msg) => Self::new(ErrorKind::Configuration, msg),
            e @ (ZeroBounceError::Serde(_) | ZeroBounceError::Io(_)) => {
                Self::new(ErrorKind::Unknown, e.to_string())
            }
        }
    }

    /// Renders `{error, error_type, [suggestion], ..context}`.
    pub fn into_mapping(self) -> Mapping {
        let mut out = self.context;
        out.insert("error".into(), Value::String(self.message));
        out.insert("error_type".into(), Value::String(self.kind.as_str().into()));
        if let Some(suggestion) = self.suggestion {
            out.insert("suggestion".into(), Value::String(suggestion));
        }
        out
    }
}
