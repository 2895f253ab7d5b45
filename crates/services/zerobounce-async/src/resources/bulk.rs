use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::{
    client::{self, Client},
    config::{Config, Host},
    error::ZeroBounceError,
    types::bulk::{
        DeleteFileResponse, FileStatusResponse, GetFileResponse, SendFileRequest,
        SendFileResponse,
    },
};

/// API resource for the bulk file endpoints
pub struct Bulk<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Bulk<'c, C> {
    /// Creates a new Bulk resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Upload a file for bulk validation
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails, or the API
    /// rejects the file.
    pub async fn send_file(
        &self,
        req: &SendFileRequest,
    ) -> Result<SendFileResponse, ZeroBounceError> {
        let bytes = tokio::fs::read(&req.file_path).await?;
        let file_name = req
            .file_path
            .file_name()
            .map_or_else(|| "upload.csv".to_string(), |n| n.to_string_lossy().into_owned());

        tracing::info!(file = %req.file_path.display(), size = bytes.len(), "uploading bulk file");

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        for (k, v) in req.form_fields() {
            form = form.text(k, v);
        }
        self.client.post_multipart(Host::Bulk, "/sendfile", form).await
    }

    /// Processing status of an uploaded file
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn file_status(&self, file_id: &str) -> Result<FileStatusResponse, ZeroBounceError> {
        self.client
            .get(Host::Bulk, "/filestatus", &[("file_id", file_id)])
            .await
    }

    /// Download the results of a processed file to `dest`
    ///
    /// The file at `dest` is created or truncated. A JSON body instead of file content
    /// means the API refused the download.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error, or `dest`
    /// cannot be written.
    pub async fn get_file(
        &self,
        file_id: &str,
        dest: &Path,
    ) -> Result<GetFileResponse, ZeroBounceError> {
        let raw = self
            .client
            .get_raw(Host::Bulk, "/getfile", &[("file_id", file_id)])
            .await?;

        if raw.is_json() {
            return match client::decode::<serde_json::Value>(&raw) {
                Err(e) => Err(e),
                Ok(body) => Err(ZeroBounceError::api(
                    raw.status,
                    format!("expected file content, got JSON: {body}"),
                )),
            };
        }

        tokio::fs::write(dest, &raw.bytes).await?;
        tracing::info!(
            file_id,
            dest = %dest.display(),
            size = raw.bytes.len(),
            "downloaded bulk results"
        );

        Ok(GetFileResponse {
            success: !raw.bytes.is_empty(),
            local_file_path: dest.display().to_string(),
            file_size: raw.bytes.len() as u64,
            content_type: raw.content_type,
        })
    }

    /// Delete an uploaded file
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, ZeroBounceError> {
        self.client
            .get(Host::Bulk, "/deletefile", &[("file_id", file_id)])
            .await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Bulk API resource
    #[must_use]
    pub const fn bulk(&self) -> Bulk<'_, C> {
        Bulk::new(self)
    }
}
