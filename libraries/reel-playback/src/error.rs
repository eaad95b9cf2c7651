//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Episode or series could not be loaded
    #[error("Load failed: {0}")]
    Load(#[from] reel_core::ReelError),

    /// Settings could not be persisted
    #[error("Settings error: {0}")]
    Settings(#[from] reel_storage::StorageError),

    /// Media output (music handle or video element) failed
    #[error("Media output error: {0}")]
    Output(String),

    /// Engine configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// Create a media output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
