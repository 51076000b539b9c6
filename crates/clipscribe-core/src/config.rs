//! Configuration management for clipscribe.
//!
//! The configuration lives in a TOML file under the user's config directory.
//! Only values that differ from the defaults are written back.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::APP_NAME;

/// Configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Address the web front-end listens on
    #[serde(
        default = "default_listen_addr",
        skip_serializing_if = "is_default_listen_addr"
    )]
    pub listen_addr: String,

    /// Transcription endpoint the upload form is forwarded to
    #[serde(
        default = "default_upload_endpoint",
        skip_serializing_if = "is_default_upload_endpoint"
    )]
    pub upload_endpoint: String,

    /// Largest upload accepted, in megabytes. Shown as a hint on the form and
    /// used as the request body limit.
    #[serde(
        default = "default_max_upload_mb",
        skip_serializing_if = "is_default_max_upload_mb"
    )]
    pub max_upload_mb: u64,

    /// Give up on the transcription endpoint after this many seconds. Unset
    /// means wait for as long as it takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn is_default_listen_addr(v: &str) -> bool {
    v == default_listen_addr()
}

fn default_upload_endpoint() -> String {
    "http://127.0.0.1:8000/upload".to_string()
}

fn is_default_upload_endpoint(v: &str) -> bool {
    v == default_upload_endpoint()
}

fn default_max_upload_mb() -> u64 {
    500
}

fn is_default_max_upload_mb(v: &u64) -> bool {
    *v == default_max_upload_mb()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            upload_endpoint: default_upload_endpoint(),
            max_upload_mb: default_max_upload_mb(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Get the listen address
    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Get the transcription endpoint
    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }

    /// Get the request timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    pub fn with_config_dir<P: AsRef<std::path::Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        if !config.upload_endpoint.starts_with("http://")
            && !config.upload_endpoint.starts_with("https://")
        {
            warn!(
                endpoint = %config.upload_endpoint,
                "Upload endpoint is not an http(s) URL, uploads will fail"
            );
        }

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}
