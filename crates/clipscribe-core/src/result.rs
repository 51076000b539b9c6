//! Data carried from the upload page to the result page.
//!
//! The two pages only talk through the result URL's query string:
//! [`ResultLink`] writes it, [`ResultDisplay`] reads it back.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::LanguageOption;

/// Route of the result page.
pub const RESULT_PATH: &str = "/Result";

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DEFAULT_FILENAME: &str = "Unknown file";
const DEFAULT_LANGUAGE: &str = "Unknown language";
const DEFAULT_MESSAGE: &str = "No message available";
const DEFAULT_TRANSCRIPTION: &str = "No transcription available";

/// Substring that marks a message as a failure.
const FAILURE_MARKER: &str = "Failed";

/// Values the upload flow hands to the result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    pub filename: String,
    pub option: LanguageOption,
    pub message: String,
    /// Left out of the URL when the server did not send one.
    pub transcription: Option<String>,
}

impl ResultLink {
    /// Builds the result page URL with every value percent-encoded.
    pub fn to_url(&self) -> String {
        let mut url = format!(
            "{}?filename={}&option={}&message={}",
            RESULT_PATH,
            encode(&self.filename),
            encode(self.option.code()),
            encode(&self.message),
        );
        if let Some(transcription) = &self.transcription {
            url.push_str("&transcription=");
            url.push_str(&encode(transcription));
        }
        url
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Coarse status shown on the result page.
///
/// This is derived from the language code alone; there is no job state
/// behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Processing,
    Completed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Completed => "Completed",
        }
    }
}

/// Visual style of the status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Failure,
}

impl MessageTone {
    /// CSS class used by the result page.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Everything the result page renders, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDisplay {
    pub filename: String,
    pub language_code: String,
    pub message: String,
    pub transcription: String,
}

impl ResultDisplay {
    /// Builds the display from raw query values. Missing and empty values
    /// both fall back to their default text.
    pub fn from_params(
        filename: Option<&str>,
        option: Option<&str>,
        message: Option<&str>,
        transcription: Option<&str>,
    ) -> Self {
        Self {
            filename: or_default(filename, DEFAULT_FILENAME),
            language_code: or_default(option, DEFAULT_LANGUAGE),
            message: or_default(message, DEFAULT_MESSAGE),
            transcription: or_default(transcription, DEFAULT_TRANSCRIPTION),
        }
    }

    pub fn language_label(&self) -> &'static str {
        LanguageOption::label_for_code(&self.language_code)
    }

    pub fn status(&self) -> JobStatus {
        if self.language_code == LanguageOption::Other.code() {
            JobStatus::Processing
        } else {
            JobStatus::Completed
        }
    }

    pub fn message_tone(&self) -> MessageTone {
        if self.message.contains(FAILURE_MARKER) {
            MessageTone::Failure
        } else {
            MessageTone::Success
        }
    }
}

impl Default for ResultDisplay {
    fn default() -> Self {
        Self::from_params(None, None, None, None)
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}
