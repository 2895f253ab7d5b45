use crate::{
    client::Client,
    config::{Config, Host},
    error::ZeroBounceError,
    types::validation::ValidateResponse,
};

/// API resource for the `/validate` endpoint
pub struct Validation<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Validation<'c, C> {
    /// Creates a new Validation resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Validate a single email address
    ///
    /// `ip_address` is the address the email signed up from, if known.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn validate(
        &self,
        email: &str,
        ip_address: Option<&str>,
    ) -> Result<ValidateResponse, ZeroBounceError> {
        let params = [("email", email), ("ip_address", ip_address.unwrap_or_default())];
        self.client.get(Host::Api, "/validate", &params).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Validation API resource
    #[must_use]
    pub const fn validation(&self) -> Validation<'_, C> {
        Validation::new(self)
    }
}
