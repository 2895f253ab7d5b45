//! Request and response types for the ZeroBounce API

/// Account endpoint types
pub mod account;
/// Bulk file endpoint types
pub mod bulk;
/// Email finder (guess format) endpoint types
pub mod email_finder;
/// Single-address validation endpoint types
pub mod validation;

pub use account::CreditsResponse;
pub use bulk::{
    DeleteFileResponse, FileStatusResponse, GetFileResponse, SendFileRequest, SendFileResponse,
};
pub use email_finder::{DomainFormat, GuessFormatRequest, GuessFormatResponse};
pub use validation::ValidateResponse;
