//! Core types and configuration for clipscribe.
//!
//! This crate holds the pieces shared by the web front-end and the upload
//! client: the language table, the validated upload selection, the result
//! page model and the configuration file.

mod config;
mod language;
mod result;
mod selection;

pub use config::{Config, ConfigManager};
pub use language::LanguageOption;
pub use result::{JobStatus, MessageTone, RESULT_PATH, ResultDisplay, ResultLink};
pub use selection::{MP4_MIME, SelectedFile, SelectionError, UploadSelection};

/// Application name
pub const APP_NAME: &str = "clipscribe";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "AI Mp4 to Text Translator";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
