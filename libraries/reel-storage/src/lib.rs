//! Reel Storage
//!
//! Durable key-value storage for process-wide player settings.
//!
//! Settings are stored as key-value pairs with JSON values, the same way a
//! browser player keeps them in local storage. Volume and mute are shared
//! across all series and episodes.
//!
//! # Example
//!
//! ```rust
//! use reel_core::PlayerSettings;
//! use reel_storage::{settings, MemorySettingsStore};
//!
//! let store = MemorySettingsStore::new();
//! settings::save_player_settings(&store, &PlayerSettings::new(0.4, true)).unwrap();
//!
//! let loaded = settings::load_player_settings(&store);
//! assert_eq!(loaded.volume, 0.4);
//! assert!(loaded.muted);
//! ```

mod error;
mod store;

pub mod settings;

pub use error::{Result, StorageError};
pub use store::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore};
