//! Tool wrappers over the provider client.
//!
//! Each tool checks its arguments, then delegates to the corresponding method on
//! [`ProviderClient`]. Failures are rendered into the returned mapping.

use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::ToolFailure;
use crate::provider::{ProviderClient, UploadColumns, ValidationSdk};
use crate::registry::ToolRegistry;
use crate::shape::Mapping;
use crate::tool::Tool;

fn render(result: Result<Mapping, ToolFailure>) -> Mapping {
    result.unwrap_or_else(ToolFailure::into_mapping)
}

fn require(field: &str, value: &str) -> Result<(), ToolFailure> {
    if value.trim().is_empty() {
        return Err(ToolFailure::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

const fn default_true() -> bool {
    true
}

// ============================================================================
// ValidateEmail Tool
// ============================================================================

/// Input for validate_email tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateEmailInput {
    /// The email address to validate
    pub email: String,
    /// The IP address the email signed up from (optional)
    #[serde(default)]
    pub ip_address: String,
}

pub struct ValidateEmailTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> ValidateEmailTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for ValidateEmailTool<S> {
    type Input = ValidateEmailInput;
    const NAME: &'static str = "validate_email";
    const DESCRIPTION: &'static str = "Validate a single email address using the ZeroBounce API.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let result = match require("email", &input.email) {
                Ok(()) => {
                    provider
                        .validate_email(&input.email, &input.ip_address)
                        .await
                }
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

// ============================================================================
// GetCredits Tool
// ============================================================================

/// Input for get_credits tool (no parameters).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetCreditsInput {}

pub struct GetCreditsTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> GetCreditsTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for GetCreditsTool<S> {
    type Input = GetCreditsInput;
    const NAME: &'static str = "get_credits";
    const DESCRIPTION: &'static str =
        "Get the number of credits remaining in your ZeroBounce account.";

    fn call(&self, _input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { render(provider.get_credits().await) })
    }
}

// ============================================================================
// UploadFile Tool
// ============================================================================

/// Input for upload_file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UploadFileInput {
    /// The path to the file to upload (.csv, .txt, .xls, or .xlsx)
    pub file_path: String,
    /// The column index of the email address in your file (starts from 1)
    pub email_column: i64,
    /// The column index of the first name column (optional)
    #[serde(default)]
    pub first_name_column: i64,
    /// The column index of the last name column (optional)
    #[serde(default)]
    pub last_name_column: i64,
    /// The column index of the gender column (optional)
    #[serde(default)]
    pub gender_column: i64,
    /// The column index of the IP address column (optional)
    #[serde(default)]
    pub ip_address_column: i64,
    /// Whether the first row is a header row (optional)
    #[serde(default = "default_true")]
    pub has_header_row: bool,
    /// The URL to call back when validation is complete (optional)
    #[serde(default)]
    pub return_url: String,
}

impl UploadFileInput {
    fn email_column(&self) -> Result<u32, ToolFailure> {
        u32::try_from(self.email_column)
            .ok()
            .filter(|c| *c >= 1)
            .ok_or_else(|| {
                ToolFailure::invalid_input(format!(
                    "email_column must be a column index starting from 1, got {}",
                    self.email_column
                ))
            })
    }

    const fn columns(&self) -> UploadColumns {
        UploadColumns {
            first_name: self.first_name_column,
            last_name: self.last_name_column,
            gender: self.gender_column,
            ip_address: self.ip_address_column,
        }
    }
}

pub struct UploadFileTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> UploadFileTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for UploadFileTool<S> {
    type Input = UploadFileInput;
    const NAME: &'static str = "upload_file";
    const DESCRIPTION: &'static str = "Upload a file for bulk email validation.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let checked =
                require("file_path", &input.file_path).and_then(|()| input.email_column());
            let result = match checked {
                Ok(email_column) => {
                    provider
                        .upload_file(
                            &input.file_path,
                            email_column,
                            input.columns(),
                            input.has_header_row,
                            &input.return_url,
                        )
                        .await
                }
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

// ============================================================================
// File id tools: CheckFileStatus, GetFile, DeleteFile
// ============================================================================

/// Input for check_file_status tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckFileStatusInput {
    /// The ID of the file to check status for
    pub file_id: String,
}

pub struct CheckFileStatusTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> CheckFileStatusTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for CheckFileStatusTool<S> {
    type Input = CheckFileStatusInput;
    const NAME: &'static str = "check_file_status";
    const DESCRIPTION: &'static str = "Check the status of a bulk email validation file.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let result = match require("file_id", &input.file_id) {
                Ok(()) => provider.check_file_status(input.file_id.trim()).await,
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

/// Input for get_file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFileInput {
    /// The ID of the file to get results for
    pub file_id: String,
}

pub struct GetFileTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> GetFileTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for GetFileTool<S> {
    type Input = GetFileInput;
    const NAME: &'static str = "get_file";
    const DESCRIPTION: &'static str =
        "Get the validation results file for a bulk email validation.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let result = match require("file_id", &input.file_id) {
                Ok(()) => provider.get_file(input.file_id.trim()).await,
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

/// Input for delete_file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteFileInput {
    /// The ID of the file to delete
    pub file_id: String,
}

pub struct DeleteFileTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> DeleteFileTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for DeleteFileTool<S> {
    type Input = DeleteFileInput;
    const NAME: &'static str = "delete_file";
    const DESCRIPTION: &'static str = "Delete a bulk email validation file.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let result = match require("file_id", &input.file_id) {
                Ok(()) => provider.delete_file(input.file_id.trim()).await,
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

// ============================================================================
// DomainSearch Tool
// ============================================================================

/// Input for domain_search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DomainSearchInput {
    /// The domain name to search for email patterns
    pub domain: String,
}

pub struct DomainSearchTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> DomainSearchTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for DomainSearchTool<S> {
    type Input = DomainSearchInput;
    const NAME: &'static str = "domain_search";
    const DESCRIPTION: &'static str = "Search for email patterns used by a domain. \
        Note: Use guess_format tool instead for better results.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            match require("domain", &input.domain) {
                Ok(()) => provider.domain_search(input.domain.trim()),
                Err(e) => e.into_mapping(),
            }
        })
    }
}

// ============================================================================
// GuessFormat Tool
// ============================================================================

/// Input for guess_format tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GuessFormatInput {
    /// The email domain for which to find the email format
    pub domain: String,
    /// The first name of the person whose email format is being searched
    pub first_name: String,
    /// The middle name of the person whose email format is being searched (optional)
    #[serde(default)]
    pub middle_name: String,
    /// The last name of the person whose email format is being searched (optional)
    #[serde(default)]
    pub last_name: String,
}

pub struct GuessFormatTool<S> {
    provider: Arc<ProviderClient<S>>,
}

impl<S> GuessFormatTool<S> {
    pub const fn new(provider: Arc<ProviderClient<S>>) -> Self {
        Self { provider }
    }
}

impl<S: ValidationSdk> Tool for GuessFormatTool<S> {
    type Input = GuessFormatInput;
    const NAME: &'static str = "guess_format";
    const DESCRIPTION: &'static str =
        "Identify the correct email format when you provide a name and email domain.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Mapping> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let checked = require("domain", &input.domain)
                .and_then(|()| require("first_name", &input.first_name));
            let result = match checked {
                Ok(()) => {
                    provider
                        .guess_format(
                            &input.domain,
                            &input.first_name,
                            &input.middle_name,
                            &input.last_name,
                        )
                        .await
                }
                Err(e) => Err(e),
            };
            render(result)
        })
    }
}

// ============================================================================
// Registry builder
// ============================================================================

/// Build a ToolRegistry containing all ZeroBounce tools, sharing one provider client.
pub fn build_registry<S: ValidationSdk>(provider: Arc<ProviderClient<S>>) -> ToolRegistry {
    ToolRegistry::builder()
        .register(ValidateEmailTool::new(Arc::clone(&provider)))
        .register(GetCreditsTool::new(Arc::clone(&provider)))
        .register(UploadFileTool::new(Arc::clone(&provider)))
        .register(CheckFileStatusTool::new(Arc::clone(&provider)))
        .register(GetFileTool::new(Arc::clone(&provider)))
        .register(DeleteFileTool::new(Arc::clone(&provider)))
        .register(DomainSearchTool::new(Arc::clone(&provider)))
        .register(GuessFormatTool::new(provider))
        .finish()
}
