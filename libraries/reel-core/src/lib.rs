//! Reel Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling
//! for the Reel documentary-series player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Series`, `Episode`, `MediaItem`, `MusicTrack`, `PlayerSettings`
//! - **Collaborator Traits**: `EpisodeSource` (data service), `Navigator` (routing)
//! - **Error Handling**: Unified `ReelError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Episode, EpisodeSource, MediaItem, Series, SeriesCatalog, SeriesId};
//!
//! let episode = Episode::new("ep-1", "Summer")
//!     .with_media(vec![MediaItem::photo("p1", "/uploads/media/beach.jpg")]);
//!
//! let catalog = SeriesCatalog::new(vec![Series::new("trip", "Road Trip", vec![episode])]);
//!
//! let series_id = SeriesId::new("trip");
//! assert_eq!(catalog.get_total_episodes(&series_id).unwrap(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::SeriesCatalog;
pub use error::{ReelError, Result};
pub use traits::{EpisodeSource, Navigator};
pub use types::{
    Episode, MediaItem, MediaKind, MusicTrack, NavigationRequest, PlayerSettings, Series,
    SeriesId,
};
