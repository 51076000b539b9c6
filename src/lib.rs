// Re-export from sub-crates
pub use clipscribe_core::{
    APP_NAME, APP_NAME_PRETTY, Config, ConfigManager, DEFAULT_LOG_LEVEL, JobStatus,
    LanguageOption, MP4_MIME, MessageTone, RESULT_PATH, ResultDisplay, ResultLink, SelectedFile,
    SelectionError, UploadSelection,
};
pub use clipscribe_upload::{HttpUploader, HttpUploaderConfig, UploadError, UploadReceipt, Uploader};

// App-specific modules
pub mod form;
pub mod pages;
pub mod server;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
