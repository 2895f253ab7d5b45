//! API resource implementations for the ZeroBounce client

/// Account API resource
pub mod account;
/// Bulk file API resource
pub mod bulk;
/// Email finder API resource
pub mod email_finder;
/// Single-address validation API resource
pub mod validation;

pub use account::Account;
pub use bulk::Bulk;
pub use email_finder::EmailFinder;
pub use validation::Validation;
