use anyhow::Result;
use clipscribe::{ConfigManager, DEFAULT_LOG_LEVEL, VERSION, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLIPSCRIBE_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .init();

    // Load config
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config)?;

    info!(
        version = VERSION,
        config_path = ?config_manager.config_path(),
        "Starting clipscribe"
    );

    server::serve(&config).await
}
