//! Core tool trait.

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::shape::Mapping;

/// A callable tool with a typed, schema-described input.
///
/// Tools never fail: provider and validation failures come back as an
/// error-shaped [`Mapping`].
///
/// # Example
///
/// ```ignore
/// struct Ping;
///
/// impl Tool for Ping {
///     type Input = PingInput;
///     const NAME: &'static str = "ping";
///     const DESCRIPTION: &'static str = "Reply with pong";
///
///     fn call(&self, _input: Self::Input) -> BoxFuture<'static, Mapping> {
///         Box::pin(async { Mapping::from_iter([("reply".into(), "pong".into())]) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Wire input; doc comments on its fields become the published schema.
    type Input: DeserializeOwned + JsonSchema + Send + 'static;

    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping>;
}
