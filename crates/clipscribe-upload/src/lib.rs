//! Upload client library for clipscribe.
//!
//! This crate provides a trait-based abstraction over the transcription
//! endpoint, with an HTTP implementation speaking its multipart contract.

mod http;

use async_trait::async_trait;
use clipscribe_core::UploadSelection;
pub use http::{HttpUploader, HttpUploaderConfig};
use thiserror::Error;

/// Errors that can occur while uploading.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The endpoint answered with a non-success status and a message.
    #[error("Server rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for upload operations.
pub type Result<T> = std::result::Result<T, UploadError>;

/// What the endpoint sent back for an accepted upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Text transcribed from the uploaded file, if the server produced any.
    pub transcription: Option<String>,
    /// Informational message, if any.
    pub message: Option<String>,
}

/// Trait for upload backends.
///
/// The web front-end only depends on this, so tests can swap in a fake.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Sends the selected file and language and waits for the result.
    ///
    /// Exactly one request is made per call; there is no retry.
    async fn upload(&self, selection: &UploadSelection) -> Result<UploadReceipt>;

    /// Returns the name of this uploader for logging/debugging.
    fn name(&self) -> &str;
}
