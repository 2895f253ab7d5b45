//! Bulk file endpoint types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request for `POST /sendfile`
///
/// Column indices are 1-based; `0` marks a column as absent from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFileRequest {
    /// Local file to upload (`.csv`, `.txt`, `.xls`, `.xlsx`)
    pub file_path: PathBuf,
    /// Column holding the email address
    pub email_address_column: u32,
    /// Column holding the first name
    pub first_name_column: u32,
    /// Column holding the last name
    pub last_name_column: u32,
    /// Column holding the gender
    pub gender_column: u32,
    /// Column holding the signup IP address
    pub ip_address_column: u32,
    /// Whether the first row is a header row
    pub has_header_row: bool,
    /// Whether duplicate addresses are dropped before validation
    pub remove_duplicate: bool,
    /// URL called back when validation completes
    pub return_url: Option<String>,
}

impl SendFileRequest {
    /// Creates a request with only the email column set
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>, email_address_column: u32) -> Self {
        Self {
            file_path: file_path.into(),
            email_address_column,
            first_name_column: 0,
            last_name_column: 0,
            gender_column: 0,
            ip_address_column: 0,
            has_header_row: true,
            remove_duplicate: true,
            return_url: None,
        }
    }

    /// Sets the first name column
    #[must_use]
    pub const fn with_first_name_column(mut self, column: u32) -> Self {
        self.first_name_column = column;
        self
    }

    /// Sets the last name column
    #[must_use]
    pub const fn with_last_name_column(mut self, column: u32) -> Self {
        self.last_name_column = column;
        self
    }

    /// Sets the gender column
    #[must_use]
    pub const fn with_gender_column(mut self, column: u32) -> Self {
        self.gender_column = column;
        self
    }

    /// Sets the IP address column
    #[must_use]
    pub const fn with_ip_address_column(mut self, column: u32) -> Self {
        self.ip_address_column = column;
        self
    }

    /// Sets whether the first row is a header row
    #[must_use]
    pub const fn with_header_row(mut self, has_header_row: bool) -> Self {
        self.has_header_row = has_header_row;
        self
    }

    /// Sets whether duplicates are removed
    #[must_use]
    pub const fn with_remove_duplicate(mut self, remove_duplicate: bool) -> Self {
        self.remove_duplicate = remove_duplicate;
        self
    }

    /// Sets the completion callback URL; empty strings clear it
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.return_url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("email_address_column", self.email_address_column.to_string()),
            ("first_name_column", self.first_name_column.to_string()),
            ("last_name_column", self.last_name_column.to_string()),
            ("gender_column", self.gender_column.to_string()),
            ("ip_address_column", self.ip_address_column.to_string()),
            ("has_header_row", self.has_header_row.to_string()),
            ("remove_duplicate", self.remove_duplicate.to_string()),
        ];
        if let Some(url) = &self.return_url {
            fields.push(("return_url", url.clone()));
        }
        fields
    }
}

/// Response of `POST /sendfile`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendFileResponse {
    /// Whether the file was accepted
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<Value>,
    /// Name of the uploaded file
    #[serde(default)]
    pub file_name: Option<String>,
    /// Identifier used by the other bulk endpoints
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Response of `GET /filestatus`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStatusResponse {
    /// Whether the lookup succeeded
    #[serde(default)]
    pub success: bool,
    /// File identifier
    #[serde(default)]
    pub file_id: Option<String>,
    /// Name of the uploaded file
    #[serde(default)]
    pub file_name: Option<String>,
    /// Upload timestamp
    #[serde(default)]
    pub upload_date: Option<String>,
    /// Processing state (`Queued`, `Processing`, `Complete`, ...)
    #[serde(default)]
    pub file_status: Option<String>,
    /// Progress, e.g. `"100%"`
    #[serde(default)]
    pub complete_percentage: Option<String>,
    /// Callback URL registered at upload
    #[serde(default)]
    pub return_url: Option<String>,
    /// Why processing failed, if it did
    #[serde(default)]
    pub error_reason: Option<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of `GET /getfile` after the body was written to disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetFileResponse {
    /// Whether a result file was received
    pub success: bool,
    /// Where the result file was written
    pub local_file_path: String,
    /// Bytes written
    pub file_size: u64,
    /// Content type reported by the server
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Response of `GET /deletefile`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    /// Whether the file was deleted
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<Value>,
    /// Name of the deleted file
    #[serde(default)]
    pub file_name: Option<String>,
    /// Identifier of the deleted file
    #[serde(default)]
    pub file_id: Option<String>,
}
