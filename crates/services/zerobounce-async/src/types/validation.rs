//! Single-address validation types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /validate`
///
/// Only `address` and `status` are always present. Fields whose wire type has varied
/// across API revisions are kept as raw JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// The address that was validated
    #[serde(default)]
    pub address: String,
    /// Validation status (`valid`, `invalid`, `catch-all`, `unknown`, `spamtrap`, `abuse`,
    /// `do_not_mail`)
    #[serde(default)]
    pub status: String,
    /// Detailed reason for the status
    #[serde(default)]
    pub sub_status: Option<String>,
    /// Whether the address belongs to a free email provider
    #[serde(default)]
    pub free_email: Option<bool>,
    /// Suggested correction for a likely typo
    #[serde(default)]
    pub did_you_mean: Option<String>,
    /// Local part of the address
    #[serde(default)]
    pub account: Option<String>,
    /// Domain part of the address
    #[serde(default)]
    pub domain: Option<String>,
    /// Age of the domain in days
    #[serde(default)]
    pub domain_age_days: Option<Value>,
    /// Detected SMTP provider
    #[serde(default)]
    pub smtp_provider: Option<String>,
    /// Whether the domain has an MX record
    #[serde(default)]
    pub mx_found: Option<Value>,
    /// Preferred MX record
    #[serde(default)]
    pub mx_record: Option<String>,
    /// Owner first name, when known
    #[serde(default)]
    pub firstname: Option<String>,
    /// Owner last name, when known
    #[serde(default)]
    pub lastname: Option<String>,
    /// Owner gender, when known
    #[serde(default)]
    pub gender: Option<String>,
    /// Country of the signup IP
    #[serde(default)]
    pub country: Option<String>,
    /// Region of the signup IP
    #[serde(default)]
    pub region: Option<String>,
    /// City of the signup IP
    #[serde(default)]
    pub city: Option<String>,
    /// Zip code of the signup IP
    #[serde(default)]
    pub zipcode: Option<String>,
    /// UTC timestamp of the validation
    #[serde(default)]
    pub processed_at: Option<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
