//! Domain types for series, episodes, media, settings and navigation

mod episode;
mod ids;
mod navigation;
mod series;
mod settings;

pub use episode::{Episode, MediaItem, MediaKind, MusicTrack};
pub use ids::SeriesId;
pub use navigation::NavigationRequest;
pub use series::Series;
pub use settings::PlayerSettings;
