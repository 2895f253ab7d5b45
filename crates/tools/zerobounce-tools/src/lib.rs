//! ZeroBounce email validation tools for CLI and MCP use.
//!
//! A single [`ProviderClient`] is built at startup and shared by every tool in the
//! registry. Tools always answer with a JSON mapping; failures carry `error` and
//! `error_type` fields instead of propagating.

pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod server;
pub mod shape;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
pub mod tool;
pub mod tools;

pub use config::{ConfigError, Settings};
pub use error::{ErrorKind, ToolFailure};
pub use provider::{ProviderClient, UploadColumns, ValidationSdk, ZeroBounceProvider};
pub use registry::{DispatchError, ToolRegistry};
pub use server::ZeroBounceServer;
pub use shape::{Mapping, shape};
pub use tool::Tool;
pub use tools::build_registry;
