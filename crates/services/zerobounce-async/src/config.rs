use secrecy::{ExposeSecret, SecretString};

/// Default ZeroBounce API base URL
pub const ZEROBOUNCE_DEFAULT_BASE: &str = "https://api.zerobounce.net/v2";
/// Default ZeroBounce bulk API base URL (file upload/download endpoints)
pub const ZEROBOUNCE_DEFAULT_BULK_BASE: &str = "https://bulkapi.zerobounce.net/v2";
/// Query parameter carrying the API key
pub const QUERY_API_KEY: &str = "api_key";

/// Configuration for the ZeroBounce client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct ZeroBounceConfig {
    api_base: String,
    bulk_api_base: String,
    api_key: Option<SecretString>,
    accept_invalid_certs: bool,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for ZeroBounceConfig {
    fn default() -> Self {
        Self {
            api_base: env_non_empty("ZEROBOUNCE_BASE_URL")
                .unwrap_or_else(|| ZEROBOUNCE_DEFAULT_BASE.into()),
            bulk_api_base: env_non_empty("ZEROBOUNCE_BULK_BASE_URL")
                .unwrap_or_else(|| ZEROBOUNCE_DEFAULT_BULK_BASE.into()),
            api_key: env_non_empty("ZEROBOUNCE_API_KEY").map(SecretString::from),
            accept_invalid_certs: false,
        }
    }
}

impl ZeroBounceConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `ZEROBOUNCE_API_KEY` for API key authentication
    /// - `ZEROBOUNCE_BASE_URL` for a custom API base URL
    /// - `ZEROBOUNCE_BULK_BASE_URL` for a custom bulk API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the bulk API base URL
    #[must_use]
    pub fn with_bulk_api_base(mut self, base: impl Into<String>) -> Self {
        self.bulk_api_base = base.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Accept invalid TLS certificates on every request made with this config.
    ///
    /// Only meant for development against intercepting proxies.
    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured bulk API base URL
    #[must_use]
    pub fn bulk_api_base(&self) -> &str {
        &self.bulk_api_base
    }
}

/// Which ZeroBounce host an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Single-address endpoints (`validate`, `getcredits`, `guessformat`)
    Api,
    /// Bulk file endpoints (`sendfile`, `filestatus`, `getfile`, `deletefile`)
    Bulk,
}

/// Configuration trait for the ZeroBounce client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Constructs the full URL for an API endpoint on the given host
    fn url(&self, host: Host, path: &str) -> String;

    /// Returns query parameters to include in requests (the API key)
    fn query(&self) -> Vec<(&str, &str)>;

    /// Whether the HTTP client should skip certificate verification
    fn accept_invalid_certs(&self) -> bool {
        false
    }

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::ZeroBounceError>;
}

impl Config for ZeroBounceConfig {
    fn url(&self, host: Host, path: &str) -> String {
        let base = match host {
            Host::Api => &self.api_base,
            Host::Bulk => &self.bulk_api_base,
        };
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn query(&self) -> Vec<(&str, &str)> {
        self.api_key
            .as_ref()
            .map(|secret| secret.expose_secret().trim())
            .filter(|key| !key.is_empty())
            .map(|key| vec![(QUERY_API_KEY, key)])
            .unwrap_or_default()
    }

    fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    fn validate_auth(&self) -> Result<(), crate::error::ZeroBounceError> {
        match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::ZeroBounceError::Config(
                "Missing ZeroBounce credentials: set ZEROBOUNCE_API_KEY environment variable"
                    .into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _key = EnvGuard::set("ZEROBOUNCE_API_KEY", "test-key-123");
        let _base = EnvGuard::set("ZEROBOUNCE_BASE_URL", "https://custom.zerobounce.test/v2");
        let _bulk = EnvGuard::remove("ZEROBOUNCE_BULK_BASE_URL");

        let cfg = ZeroBounceConfig::new();
        assert_eq!(cfg.api_base(), "https://custom.zerobounce.test/v2");
        assert_eq!(cfg.bulk_api_base(), ZEROBOUNCE_DEFAULT_BULK_BASE);
        assert_eq!(cfg.query(), vec![("api_key", "test-key-123")]);
    }

    #[test]
    #[serial(env)]
    fn validate_auth_missing_key() {
        let _key = EnvGuard::remove("ZEROBOUNCE_API_KEY");

        let cfg = ZeroBounceConfig::new();
        assert!(cfg.validate_auth().is_err());
        assert!(cfg.query().is_empty());
    }

    #[test]
    fn validate_auth_rejects_empty_or_whitespace() {
        let cfg = ZeroBounceConfig::new().with_api_key("");
        assert!(cfg.validate_auth().is_err());

        let cfg = ZeroBounceConfig::new().with_api_key("  \n");
        assert!(cfg.validate_auth().is_err());

        let cfg = ZeroBounceConfig::new().with_api_key("  valid-key  ");
        assert!(cfg.validate_auth().is_ok());
        assert_eq!(cfg.query(), vec![("api_key", "valid-key")]);
    }

    #[test]
    fn url_joins_host_and_path() {
        let cfg = ZeroBounceConfig::new()
            .with_api_base("https://api.example.test/v2/")
            .with_bulk_api_base("https://bulk.example.test/v2");

        assert_eq!(
            cfg.url(Host::Api, "/validate"),
            "https://api.example.test/v2/validate"
        );
        assert_eq!(
            cfg.url(Host::Bulk, "sendfile"),
            "https://bulk.example.test/v2/sendfile"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = ZeroBounceConfig::new().with_api_key("super-secret-key-12345");
        let debug_str = format!("{cfg:?}");

        assert!(!debug_str.contains("super-secret-key-12345"));
        assert!(debug_str.contains("[REDACTED]"), "got: {debug_str}");
    }

    #[test]
    fn invalid_certs_off_by_default() {
        let cfg = ZeroBounceConfig::new();
        assert!(!Config::accept_invalid_certs(&cfg));

        let cfg = cfg.with_accept_invalid_certs(true);
        assert!(Config::accept_invalid_certs(&cfg));
    }
}
