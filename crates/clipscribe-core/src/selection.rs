//! The file and language a user picked, and the check that gates submission.

use bytes::Bytes;
use thiserror::Error;

use crate::LanguageOption;

/// The only declared content type accepted for upload.
pub const MP4_MIME: &str = "video/mp4";

/// Reasons a selection is not allowed to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please upload a valid MP4 file.")]
    MissingFile,

    #[error("Only MP4 video files are allowed. Please select an MP4 file.")]
    NotMp4 { content_type: Option<String> },

    #[error("Please select a language option.")]
    MissingLanguage,
}

/// A file as the browser handed it over.
///
/// Nothing is known about the bytes beyond the name and the declared
/// content type.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    content_type: Option<String>,
    data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the declared type is exactly `video/mp4`.
    ///
    /// This is a string comparison on what the browser declared. The
    /// container, codec, duration and size are never inspected.
    pub fn is_mp4(&self) -> bool {
        self.content_type() == Some(MP4_MIME)
    }
}

/// A file and language that passed validation.
///
/// The only constructor is [`UploadSelection::validate`], so holding one
/// means the file was declared as `video/mp4`.
#[derive(Debug, Clone)]
pub struct UploadSelection {
    file: SelectedFile,
    language: LanguageOption,
}

impl UploadSelection {
    /// Checks the file first, then the language, matching the order the
    /// form reports problems in.
    pub fn validate(
        file: Option<SelectedFile>,
        language: Option<LanguageOption>,
    ) -> Result<Self, SelectionError> {
        let file = file.ok_or(SelectionError::MissingFile)?;
        if !file.is_mp4() {
            return Err(SelectionError::NotMp4 {
                content_type: file.content_type,
            });
        }
        let language = language.ok_or(SelectionError::MissingLanguage)?;
        Ok(Self { file, language })
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub fn language(&self) -> LanguageOption {
        self.language
    }
}
