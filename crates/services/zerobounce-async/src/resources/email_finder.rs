use crate::{
    client::Client,
    config::{Config, Host},
    error::ZeroBounceError,
    types::email_finder::{GuessFormatRequest, GuessFormatResponse},
};

/// API resource for the `/guessformat` endpoint
pub struct EmailFinder<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> EmailFinder<'c, C> {
    /// Creates a new EmailFinder resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Identify the address format a domain uses for a given name
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn guess_format(
        &self,
        req: &GuessFormatRequest,
    ) -> Result<GuessFormatResponse, ZeroBounceError> {
        self.client
            .get(Host::Api, "/guessformat", &req.params())
            .await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the EmailFinder API resource
    #[must_use]
    pub const fn email_finder(&self) -> EmailFinder<'_, C> {
        EmailFinder::new(self)
    }
}
