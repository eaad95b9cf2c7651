//! Reel CLI Library
//!
//! Headless driver for the Reel player: loads a series catalog, plays
//! episodes on a simulated clock and manages the persisted player settings.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod simulate;

// Re-export commonly used types for convenience
pub use config::{ReelConfig, StorageSettings};
pub use error::{CliError, Result};
pub use simulate::{run, EpisodeReport, SimulationOptions, SimulationReport};
