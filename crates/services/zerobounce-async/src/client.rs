use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, multipart::Form};
use serde::de::DeserializeOwned;

use crate::{
    config::{Config, Host},
    error::{self, ZeroBounceError},
};

/// ZeroBounce API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration. It performs no retries: every call maps to exactly one
/// HTTP request.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

/// Body and metadata of a successful response, before decoding
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) content_type: Option<String>,
    pub(crate) bytes: bytes::Bytes,
}

impl RawResponse {
    pub(crate) fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_config(config: C) -> Result<Self, ZeroBounceError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("zerobounce-async/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300));

        if config.accept_invalid_certs() {
            tracing::warn!(
                "TLS certificate verification is DISABLED for ZeroBounce requests; \
                 use only in development environments"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O>(
        &self,
        host: Host,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<O, ZeroBounceError>
    where
        O: DeserializeOwned,
    {
        let raw = self.get_raw(host, path, params).await?;
        decode(&raw)
    }

    pub(crate) async fn get_raw(
        &self,
        host: Host,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<RawResponse, ZeroBounceError> {
        let request = self
            .http
            .get(self.config.url(host, path))
            .query(&self.config.query())
            .query(params)
            .build()?;
        self.execute_raw(path, request).await
    }

    pub(crate) async fn post_multipart<O>(
        &self,
        host: Host,
        path: &str,
        mut form: Form,
    ) -> Result<O, ZeroBounceError>
    where
        O: DeserializeOwned,
    {
        // The bulk upload endpoint expects the key as a form field, not a query parameter.
        for (k, v) in self.config.query() {
            form = form.text(k.to_string(), v.to_string());
        }
        let request = self
            .http
            .post(self.config.url(host, path))
            .multipart(form)
            .build()?;
        let raw = self.execute_raw(path, request).await?;
        decode(&raw)
    }

    async fn execute_raw(
        &self,
        path: &str,
        request: reqwest::Request,
    ) -> Result<RawResponse, ZeroBounceError> {
        // Validate auth before any request
        self.config.validate_auth()?;

        tracing::debug!(path, method = %request.method(), "zerobounce request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(error::map_transport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(error::map_transport)?;

        if !status.is_success() {
            return Err(error::deserialize_api_error(status, &bytes));
        }

        Ok(RawResponse {
            status,
            content_type,
            bytes,
        })
    }
}

pub(crate) fn decode<O: DeserializeOwned>(raw: &RawResponse) -> Result<O, ZeroBounceError> {
    let value: serde_json::Value =
        serde_json::from_slice(&raw.bytes).map_err(|e| error::map_deser(&e, &raw.bytes))?;
    if let Some(err) = error::api_error_in_body(raw.status, &value) {
        return Err(err);
    }
    serde_json::from_value(value).map_err(|e| error::map_deser(&e, &raw.bytes))
}
