/// Core error types for Reel
use thiserror::Error;

use crate::types::SeriesId;

/// Result type alias using `ReelError`
pub type Result<T> = std::result::Result<T, ReelError>;

/// Core error type for Reel
#[derive(Error, Debug)]
pub enum ReelError {
    /// Series not found
    #[error("Series not found: {0}")]
    SeriesNotFound(SeriesId),

    /// Episode index past the end of the series
    #[error("Episode {index} not found in series {series_id}")]
    EpisodeNotFound {
        /// Series that was queried
        series_id: SeriesId,
        /// Requested episode index
        index: usize,
    },

    /// Settings storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ReelError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
