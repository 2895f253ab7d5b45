use reqwest::StatusCode;

use crate::{
    client::Client,
    config::{Config, Host},
    error::ZeroBounceError,
    types::account::CreditsResponse,
};

/// API resource for account endpoints
pub struct Account<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Account<'c, C> {
    /// Creates a new Account resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Number of credits remaining on the account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the count cannot be parsed, or the API
    /// reports `-1` (rejected key).
    pub async fn credits(&self) -> Result<i64, ZeroBounceError> {
        let resp: CreditsResponse = self.client.get(Host::Api, "/getcredits", &[]).await?;
        match resp.count() {
            Some(n) if n >= 0 => Ok(n),
            Some(_) => Err(ZeroBounceError::api(
                StatusCode::OK,
                "Invalid API key or your account ran out of credits",
            )),
            None => Err(ZeroBounceError::Serde(format!(
                "unexpected Credits value: {}",
                resp.credits
            ))),
        }
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Account API resource
    #[must_use]
    pub const fn account(&self) -> Account<'_, C> {
        Account::new(self)
    }
}
