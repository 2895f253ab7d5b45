//! Test-only helpers: env guards and a recording vendor fake.
//!
//! Every test that uses [`EnvGuard`] must be marked `#[serial(env)]`.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use zerobounce_async::types::{
    DeleteFileResponse, FileStatusResponse, GetFileResponse, GuessFormatRequest,
    GuessFormatResponse, SendFileRequest, SendFileResponse, ValidateResponse,
};
use zerobounce_async::{ApiErrorObject, ZeroBounceError};

use crate::provider::ValidationSdk;

/// RAII guard that restores an environment variable when dropped.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with #[serial(env)]
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with #[serial(env)]
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            // SAFETY: still inside the serialized test body
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            // SAFETY: still inside the serialized test body
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// How every scripted vendor call ends.
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    Succeed,
    /// The provider rejects the call with this message.
    ApiError(String),
    /// The TLS handshake fails with this detail.
    TlsError(String),
    /// The worker panics.
    Panic,
}

/// What `get_file` leaves at the destination path.
#[derive(Debug, Clone)]
pub enum Download {
    Bytes(Vec<u8>),
    Empty,
    /// The destination is removed.
    Missing,
}

impl Default for Download {
    fn default() -> Self {
        Self::Bytes(b"email,status\njill@example.com,valid\n".to_vec())
    }
}

#[derive(Default)]
struct Recorded {
    validate: Option<(String, Option<String>)>,
    upload: Option<SendFileRequest>,
    guess: Option<GuessFormatRequest>,
    download_dests: Vec<PathBuf>,
}

/// Recording [`ValidationSdk`] fake.
#[derive(Default)]
pub struct MockSdk {
    behavior: Behavior,
    download: Download,
    calls: AtomicUsize,
    recorded: Mutex<Recorded>,
}

impl MockSdk {
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_download(mut self, download: Download) -> Self {
        self.download = download;
        self
    }

    /// Number of vendor calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_validate(&self) -> Option<(String, Option<String>)> {
        self.recorded().validate.clone()
    }

    pub fn last_upload(&self) -> Option<SendFileRequest> {
        self.recorded().upload.clone()
    }

    pub fn last_guess(&self) -> Option<GuessFormatRequest> {
        self.recorded().guess.clone()
    }

    /// Every destination path handed to `get_file`, in call order.
    pub fn download_dests(&self) -> Vec<PathBuf> {
        self.recorded().download_dests.clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn respond<T: Send + 'static>(
        &self,
        ok: T,
    ) -> BoxFuture<'static, Result<T, ZeroBounceError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.clone();
        Box::pin(async move {
            match behavior {
                Behavior::Succeed => Ok(ok),
                Behavior::ApiError(message) => Err(ZeroBounceError::Api(ApiErrorObject {
                    status_code: Some(200),
                    message,
                })),
                Behavior::TlsError(detail) => Err(ZeroBounceError::Tls(detail)),
                Behavior::Panic => panic!("scripted worker panic"),
            }
        })
    }
}

impl ValidationSdk for MockSdk {
    fn validate(
        &self,
        email: String,
        ip_address: Option<String>,
    ) -> BoxFuture<'static, Result<ValidateResponse, ZeroBounceError>> {
        self.recorded().validate = Some((email.clone(), ip_address));
        self.respond(ValidateResponse {
            address: email,
            status: "valid".into(),
            sub_status: Some(String::new()),
            free_email: Some(false),
            ..ValidateResponse::default()
        })
    }

    fn credits(&self) -> BoxFuture<'static, Result<i64, ZeroBounceError>> {
        self.respond(1000)
    }

    fn send_file(
        &self,
        req: SendFileRequest,
    ) -> BoxFuture<'static, Result<SendFileResponse, ZeroBounceError>> {
        let file_name = req
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.recorded().upload = Some(req);
        self.respond(SendFileResponse {
            success: true,
            message: Some("File Accepted".into()),
            file_name,
            file_id: Some("abc123".into()),
        })
    }

    fn file_status(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<FileStatusResponse, ZeroBounceError>> {
        self.respond(FileStatusResponse {
            success: true,
            file_id: Some(file_id),
            file_status: Some("Complete".into()),
            complete_percentage: Some("100%".into()),
            ..FileStatusResponse::default()
        })
    }

    fn get_file(
        &self,
        _file_id: String,
        dest: PathBuf,
    ) -> BoxFuture<'static, Result<GetFileResponse, ZeroBounceError>> {
        self.recorded().download_dests.push(dest.clone());
        let download = self.download.clone();
        let reply = self.respond(());
        Box::pin(async move {
            reply.await?;
            let written = match download {
                Download::Bytes(bytes) => {
                    tokio::fs::write(&dest, &bytes).await?;
                    bytes.len() as u64
                }
                Download::Empty => {
                    tokio::fs::write(&dest, b"").await?;
                    0
                }
                Download::Missing => {
                    tokio::fs::remove_file(&dest).await?;
                    0
                }
            };
            Ok(GetFileResponse {
                success: written > 0,
                local_file_path: dest.display().to_string(),
                file_size: written,
                content_type: Some("application/octet-stream".into()),
            })
        })
    }

    fn delete_file(
        &self,
        file_id: String,
    ) -> BoxFuture<'static, Result<DeleteFileResponse, ZeroBounceError>> {
        self.respond(DeleteFileResponse {
            success: true,
            message: Some("File Deleted".into()),
            file_name: None,
            file_id: Some(file_id),
        })
    }

    fn guess_format(
        &self,
        req: GuessFormatRequest,
    ) -> BoxFuture<'static, Result<GuessFormatResponse, ZeroBounceError>> {
        let email = format!("{}@{}", req.first_name.to_lowercase(), req.domain);
        let domain = req.domain.clone();
        self.recorded().guess = Some(req);
        self.respond(GuessFormatResponse {
            email: Some(email),
            domain: Some(domain),
            format: Some("first".into()),
            confidence: Some("high".into()),
            ..GuessFormatResponse::default()
        })
    }
}
