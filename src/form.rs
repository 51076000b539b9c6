//! Upload form state and the submit flow.
//!
//! One [`UploadForm`] lives for one page submission. It holds what the user
//! picked, runs the local checks, and makes the single call to the
//! transcription endpoint.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    LanguageOption, ResultLink, SelectedFile, SelectionError, UploadError, UploadSelection,
    Uploader,
};

/// Message handed to the result page after an accepted upload.
pub const SUCCESS_MESSAGE: &str = "Submitted successfully!";

/// Why a submission did not reach the result page.
///
/// The display text of each variant is what the user is shown.
#[derive(Debug, Error)]
pub enum FormError {
    /// Blocked before any request was made.
    #[error(transparent)]
    Invalid(#[from] SelectionError),

    /// The endpoint refused the upload and said why.
    #[error("Failed to upload file: {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed or the answer could not be read.
    #[error("An unexpected error occurred. Please check your network connection and try again.")]
    Unexpected(#[source] UploadError),
}

/// State behind the upload page.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    language: Option<LanguageOption>,
    submitting: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a file. A file not declared as `video/mp4` is refused and any
    /// earlier pick is dropped, so it can never reach [`submit`](Self::submit).
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), FormError> {
        if file.is_mp4() {
            self.file = Some(file);
            return Ok(());
        }
        warn!(
            filename = file.name(),
            content_type = ?file.content_type(),
            "Refusing non-MP4 file"
        );
        self.file = None;
        Err(SelectionError::NotMp4 {
            content_type: file.content_type().map(str::to_string),
        }
        .into())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Picks a language by code. The empty placeholder and unknown codes
    /// leave the form without a language.
    pub fn select_language(&mut self, code: &str) {
        self.language = LanguageOption::from_code(code);
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn language(&self) -> Option<LanguageOption> {
        self.language
    }

    /// True only while the upload request is in flight.
    ///
    /// The browser never sees this flag: the page script disables the button
    /// and shows the spinner itself. On the server it only records that
    /// [`submit`](Self::submit) always leaves the form idle again.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates the form, uploads it and returns where to send the browser.
    ///
    /// Validation failures return before any request is made. Whatever the
    /// outcome, the form is no longer submitting when this returns.
    pub async fn submit(&mut self, uploader: &dyn Uploader) -> Result<ResultLink, FormError> {
        let selection = UploadSelection::validate(self.file.clone(), self.language)?;

        info!(
            uploader = uploader.name(),
            filename = selection.file().name(),
            option = selection.language().code(),
            bytes = selection.file().len(),
            "Submitting upload"
        );

        self.submitting = true;
        let outcome = uploader.upload(&selection).await;
        self.submitting = false;

        match outcome {
            Ok(receipt) => {
                info!(
                    has_transcription = receipt.transcription.is_some(),
                    "Upload accepted"
                );
                Ok(ResultLink {
                    filename: selection.file().name().to_string(),
                    option: selection.language(),
                    message: SUCCESS_MESSAGE.to_string(),
                    transcription: receipt.transcription,
                })
            }
            Err(UploadError::Rejected { status, message }) => {
                warn!(status, message = %message, "Upload rejected by server");
                Err(FormError::Rejected { status, message })
            }
            Err(e) => {
                error!(error = %e, "Upload failed");
                Err(FormError::Unexpected(e))
            }
        }
    }
}
