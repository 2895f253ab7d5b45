//! Email finder (guess format) types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request for `GET /guessformat`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessFormatRequest {
    /// Domain to look up
    pub domain: String,
    /// First name of the person
    pub first_name: String,
    /// Middle name of the person (empty when unknown)
    pub middle_name: String,
    /// Last name of the person (empty when unknown)
    pub last_name: String,
}

impl GuessFormatRequest {
    /// Creates a request for a domain and first name
    #[must_use]
    pub fn new(domain: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            first_name: first_name.into(),
            ..Self::default()
        }
    }

    /// Sets the middle name
    #[must_use]
    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = middle_name.into();
        self
    }

    /// Sets the last name
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub(crate) fn params(&self) -> Vec<(&str, &str)> {
        vec![
            ("domain", self.domain.as_str()),
            ("first_name", self.first_name.as_str()),
            ("middle_name", self.middle_name.as_str()),
            ("last_name", self.last_name.as_str()),
        ]
    }
}

/// One alternative address format seen on a domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainFormat {
    /// Format pattern, e.g. `first.last`
    #[serde(default)]
    pub format: String,
    /// Confidence label (`high`, `medium`, `low`)
    #[serde(default)]
    pub confidence: Option<String>,
}

/// Response of `GET /guessformat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuessFormatResponse {
    /// Best-guess address for the given name
    #[serde(default)]
    pub email: Option<String>,
    /// Domain that was looked up
    #[serde(default)]
    pub domain: Option<String>,
    /// Most likely address format on the domain
    #[serde(default)]
    pub format: Option<String>,
    /// Validation status of the guessed address
    #[serde(default)]
    pub status: Option<String>,
    /// Detailed reason for the status
    #[serde(default)]
    pub sub_status: Option<String>,
    /// Confidence label for `format`
    #[serde(default)]
    pub confidence: Option<String>,
    /// Suggested domain correction
    #[serde(default)]
    pub did_you_mean: Option<String>,
    /// Reason the lookup failed, if it did
    #[serde(default)]
    pub failure_reason: Option<String>,
    /// Other formats seen on the domain
    #[serde(default)]
    pub other_domain_formats: Vec<DomainFormat>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
