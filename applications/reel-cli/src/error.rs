//! CLI error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] reel_core::ReelError),

    #[error("Playback error: {0}")]
    Playback(#[from] reel_playback::PlaybackError),

    #[error("Settings error: {0}")]
    Settings(#[from] reel_storage::StorageError),

    #[error("Simulation stalled: {0}")]
    Stalled(String),
}
