//! Provider client: runs vendor calls on workers and shapes their outcome.

use std::future::Future;
use std::path::PathBuf;

use futures::future::BoxFuture;
use serde_json::Value;
use zerobounce_async::config::Config;
use zerobounce_async::types::{
    DeleteFileResponse, FileStatusResponse, GetFileResponse, GuessFormatRequest,
    GuessFormatResponse, SendFileRequest, SendFileResponse, ValidateResponse,
};
use zerobounce_async::{Client, ZeroBounceConfig, ZeroBounceError};

use crate::config::Settings;
use crate::error::{ErrorKind, ToolFailure};
use crate::shape::{Mapping, RESULT_FIELD, shape};

/// Field used for the credit balance.
pub const CREDITS_FIELD: &str = "credits";

/// Vendor operations the provider client depends on.
///
/// Implemented for [`zerobounce_async::Client`]; tests substitute a recording fake.
/// Futures are `'static` so they can be moved onto a worker task.
pub trait ValidationSdk: Send + Sync + 'static {
    fn validate(
        &self,
        email: String,
        ip_address: Option<String>,
    ) -> BoxFuture<'static, Result<ValidateResponse, ZeroBounceError>>;

    fn credits(&self) -> BoxFuture<'static, Result<i64, ZeroBounceError>>;

    fn send_file(
        &self,
        req: SendFileRequest,
    ) -> BoxFuture<'static, Result<SendFileResponse, ZeroBounceError>>;

    fn file_status(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<FileStatusResponse, ZeroBounceError>>;

    fn get_file(
        &self,
        file_id: String,
        dest: PathBuf,
    ) -> BoxFuture<'static, Result<GetFileResponse, ZeroBounceError>>;

    fn delete_file(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<DeleteFileResponse, ZeroBounceError>>;

    fn guess_format(
        &self,
        req: GuessFormatRequest,
    ) -> BoxFuture<'static, Result<GuessFormatResponse, ZeroBounceError>>;
}

impl<C> ValidationSdk for Client<C>
where
    C: Config + Clone + 'static,
{
    fn validate(
        &self,
        email: String,
        ip_address: Option<String>,
    ) -> BoxFuture<'static, Result<ValidateResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move {
            client
                .validation()
                .validate(&email, ip_address.as_deref())
                .await
        })
    }

    fn credits(&self) -> BoxFuture<'static, Result<i64, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.account().credits().await })
    }

    fn send_file(
        &self,
        req: SendFileRequest,
    ) -> BoxFuture<'static, Result<SendFileResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.bulk().send_file(&req).await })
    }

    fn file_status(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<FileStatusResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.bulk().file_status(&file_id).await })
    }

    fn get_file(
        &self,
        file_id: String,
        dest: PathBuf,
    ) -> BoxFuture<'static, Result<GetFileResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.bulk().get_file(&file_id, &dest).await })
    }

    fn delete_file(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<DeleteFileResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.bulk().delete_file(&file_id).await })
    }

    fn guess_format(
        &self,
        req: GuessFormatRequest,
    ) -> BoxFuture<'static, Result<GuessFormatResponse, ZeroBounceError>> {
        let client = self.clone();
        Box::pin(async move { client.email_finder().guess_format(&req).await })
    }
}

/// Optional column indices for a bulk upload; values `<= 0` mean "not present".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadColumns {
    pub first_name: i64,
    pub last_name: i64,
    pub gender: i64,
    pub ip_address: i64,
}

fn column(index: i64) -> u32 {
    u32::try_from(index.max(0)).unwrap_or(u32::MAX)
}

/// Wraps a [`ValidationSdk`] and turns each call into a [`Mapping`].
pub struct ProviderClient<S> {
    sdk: S,
    verify_tls: bool,
}

/// Provider client over the real HTTP vendor client.
pub type ZeroBounceProvider = ProviderClient<Client<ZeroBounceConfig>>;

impl ZeroBounceProvider {
    /// Builds the HTTP vendor client from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ToolFailure> {
        let client = Client::with_config(settings.vendor_config())
            .map_err(|e| ToolFailure::translate(e, settings.verify_ssl()))?;
        Ok(Self::new(client, settings.verify_ssl()))
    }
}

impl<S: ValidationSdk> ProviderClient<S> {
    pub fn new(sdk: S, verify_tls: bool) -> Self {
        if !verify_tls {
            tracing::warn!(
                "SSL verification disabled. This should only be used in development environments."
            );
        }
        Self { sdk, verify_tls }
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    /// Runs `fut` on a worker task and classifies its failure.
    async fn offload<T, F>(&self, op: &'static str, fut: F) -> Result<T, ToolFailure>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ZeroBounceError>> + Send + 'static,
    {
        let failure = match tokio::spawn(fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => ToolFailure::translate(e, self.verify_tls),
            Err(join) => {
                ToolFailure::new(ErrorKind::Unknown, format!("{op} worker failed: {join}"))
            }
        };
        tracing::error!(
            op,
            kind = %failure.kind,
            error = %failure.message,
            "zerobounce call failed"
        );
        Err(failure)
    }

    pub async fn validate_email(
        &self,
        email: &str,
        ip_address: &str,
    ) -> Result<Mapping, ToolFailure> {
        let ip = Some(ip_address.trim())
            .filter(|ip| !ip.is_empty())
            .map(str::to_string);
        let fut = self.sdk.validate(email.trim().to_string(), ip);
        let resp = self.offload("validate_email", fut).await?;
        shape(&resp, RESULT_FIELD)
    }

    pub async fn get_credits(&self) -> Result<Mapping, ToolFailure> {
        let credits = self.offload("get_credits", self.sdk.credits()).await?;
        shape(&credits, CREDITS_FIELD)
    }

    pub async fn upload_file(
        &self,
        file_path: &str,
        email_column: u32,
        columns: UploadColumns,
        has_header_row: bool,
        return_url: &str,
    ) -> Result<Mapping, ToolFailure> {
        tracing::info!(file_path, "Uploading file");

        let req = SendFileRequest::new(file_path, email_column)
            .with_first_name_column(column(columns.first_name))
            .with_last_name_column(column(columns.last_name))
            .with_gender_column(column(columns.gender))
            .with_ip_address_column(column(columns.ip_address))
            .with_header_row(has_header_row)
            .with_remove_duplicate(true)
            .with_return_url(return_url);

        let resp = self.offload("upload_file", self.sdk.send_file(req)).await?;
        shape(&resp, RESULT_FIELD)
    }

    pub async fn check_file_status(&self, file_id: &str) -> Result<Mapping, ToolFailure> {
        let fut = self.sdk.file_status(file_id.to_string());
        let resp = self.offload("check_file_status", fut).await?;
        shape(&resp, RESULT_FIELD)
    }

    /// Downloads results into a fresh `.csv` temp file that outlives this call.
    pub async fn get_file(&self, file_id: &str) -> Result<Mapping, ToolFailure> {
        let dest = tempfile::Builder::new()
            .prefix("zerobounce-")
            .suffix(".csv")
            .tempfile()
            .and_then(|f| f.into_temp_path().keep().map_err(|e| e.error))
            .map_err(|e| {
                ToolFailure::new(
                    ErrorKind::Unknown,
                    format!("could not create download file: {e}"),
                )
            })?;
        let local_file_path = dest.display().to_string();

        tracing::info!(file_id, path = %local_file_path, "Downloading file");

        let fut = self.sdk.get_file(file_id.to_string(), dest.clone());
        let resp = match self.offload("get_file", fut).await {
            Ok(resp) => resp,
            Err(failure) => {
                if let Err(e) = tokio::fs::remove_file(&dest).await {
                    tracing::debug!(
                        path = %local_file_path,
                        error = %e,
                        "could not remove download file"
                    );
                }
                return Err(failure.with_context("file_id", file_id));
            }
        };

        let file_size = tokio::fs::metadata(&dest).await.map_or(0, |m| m.len());
        if file_size == 0 {
            return Err(ToolFailure::new(
                ErrorKind::Provider,
                "File download failed or file is empty",
            )
            .with_context("file_id", file_id)
            .with_context("local_file_path", local_file_path));
        }

        let mut out = Mapping::new();
        out.insert("success".into(), Value::Bool(true));
        out.insert("file_id".into(), file_id.into());
        out.insert("local_file_path".into(), local_file_path.clone().into());
        out.insert("file_size".into(), file_size.into());
        out.insert(
            "message".into(),
            format!("File downloaded successfully to {local_file_path}").into(),
        );
        out.insert(
            "sdk_response".into(),
            Value::Object(shape(&resp, RESULT_FIELD)?),
        );
        Ok(out)
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<Mapping, ToolFailure> {
        let fut = self.sdk.delete_file(file_id.to_string());
        let resp = self.offload("delete_file", fut).await?;
        shape(&resp, RESULT_FIELD)
    }

    /// Fixed notice; the provider has no domain search endpoint.
    pub fn domain_search(&self, domain: &str) -> Mapping {
        tracing::warn!("domain_search is deprecated. Use guess_format instead for better results.");

        let mut out = Mapping::new();
        out.insert(
            "error".into(),
            "domain_search method is not available in the official SDK".into(),
        );
        out.insert("suggestion".into(), "Use guess_format method instead".into());
        out.insert("domain".into(), domain.into());
        out
    }

    pub async fn guess_format(
        &self,
        domain: &str,
        first_name: &str,
        middle_name: &str,
        last_name: &str,
    ) -> Result<Mapping, ToolFailure> {
        let req = GuessFormatRequest::new(domain.trim(), first_name.trim())
            .with_middle_name(middle_name.trim())
            .with_last_name(last_name.trim());
        let resp = self.offload("guess_format", self.sdk.guess_format(req)).await?;
        shape(&resp, RESULT_FIELD)
    }
}
