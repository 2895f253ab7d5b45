//! Process settings read once at startup.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use zerobounce_async::ZeroBounceConfig;
use zerobounce_async::config::{ZEROBOUNCE_DEFAULT_BASE, ZEROBOUNCE_DEFAULT_BULK_BASE};

/// Environment variable carrying the API key.
pub const API_KEY_VAR: &str = "ZEROBOUNCE_API_KEY";
/// Optional override for the single-address API host.
pub const BASE_URL_VAR: &str = "ZEROBOUNCE_BASE_URL";
/// Optional override for the bulk file API host.
pub const BULK_BASE_URL_VAR: &str = "ZEROBOUNCE_BULK_BASE_URL";
/// Certificate verification toggle; verification stays on unless explicitly disabled.
pub const VERIFY_SSL_VAR: &str = "ZEROBOUNCE_VERIFY_SSL";

/// Errors raised while assembling [`Settings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ZEROBOUNCE_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("invalid value for {var}: {value:?} (expected true/false)")]
    InvalidFlag { var: &'static str, value: String },
}

/// Credentials and connection settings for the provider client.
#[derive(Clone, Debug)]
pub struct Settings {
    api_key: SecretString,
    api_base: Option<String>,
    bulk_api_base: Option<String>,
    verify_ssl: bool,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

impl Settings {
    /// Builds settings from an explicit key. Blank keys are rejected.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key: SecretString::from(api_key.trim().to_string()),
            api_base: None,
            bulk_api_base: None,
            verify_ssl: true,
        })
    }

    /// Reads `ZEROBOUNCE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_non_empty(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let verify_ssl = match env_non_empty(VERIFY_SSL_VAR) {
            Some(raw) => parse_flag(VERIFY_SSL_VAR, &raw)?,
            None => true,
        };

        let mut settings = Self::new(api_key)?.with_verify_ssl(verify_ssl);
        settings.api_base = env_non_empty(BASE_URL_VAR);
        settings.bulk_api_base = env_non_empty(BULK_BASE_URL_VAR);
        Ok(settings)
    }

    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_bulk_api_base(mut self, base: impl Into<String>) -> Self {
        self.bulk_api_base = Some(base.into());
        self
    }

    #[must_use]
    pub const fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub const fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Vendor client configuration derived from these settings alone.
    ///
    /// Every field is set explicitly so nothing is picked up from the environment.
    pub fn vendor_config(&self) -> ZeroBounceConfig {
        let api_base = self.api_base.as_deref().unwrap_or(ZEROBOUNCE_DEFAULT_BASE);
        let bulk_base = self.bulk_api_base.as_deref();
        ZeroBounceConfig::new()
            .with_api_key(self.api_key.expose_secret())
            .with_api_base(api_base)
            .with_bulk_api_base(bulk_base.unwrap_or(ZEROBOUNCE_DEFAULT_BULK_BASE))
            .with_accept_invalid_certs(!self.verify_ssl)
    }
}
