//! Episode and media types

use serde::{Deserialize, Serialize};

/// Label shown for a music track that has no display name
const DEFAULT_MUSIC_LABEL: &str = "Background Music";

/// Kind of a media item
///
/// Photos are shown for a fixed nominal duration; videos run for their
/// intrinsic length, known only once the underlying player reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Photo,
    /// Self-timed video clip
    Video,
}

/// One photo or video entry within an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique media identifier
    pub id: String,

    /// Photo or video
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Source locator (URL or storage path)
    pub url: String,
}

impl MediaItem {
    /// Create a photo item
    pub fn photo(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Photo,
            url: url.into(),
        }
    }

    /// Create a video item
    pub fn video(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Video,
            url: url.into(),
        }
    }

    /// Check if this item is a video
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Background music attached to an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicTrack {
    /// Source locator of the audio file
    pub url: String,

    /// Original file name, shown in the music indicator
    #[serde(default)]
    pub name: Option<String>,
}

impl MusicTrack {
    /// Create a music track without a display name
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
        }
    }

    /// Label for the "now playing" indicator
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_MUSIC_LABEL)
    }
}

/// Ordered collection of media items plus optional music
///
/// Insertion order of `media` is playback order. An episode is immutable
/// for the duration of a playback session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode identifier
    #[serde(default)]
    pub id: String,

    /// Episode title
    pub title: String,

    /// Free-text description shown as an overlay
    #[serde(default)]
    pub description: String,

    /// Media in playback order
    #[serde(default)]
    pub media: Vec<MediaItem>,

    /// At most one background music track
    #[serde(default)]
    pub music: Option<MusicTrack>,
}

impl Episode {
    /// Create an empty episode
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            media: Vec::new(),
            music: None,
        }
    }

    /// Replace the media list
    #[must_use]
    pub fn with_media(mut self, media: Vec<MediaItem>) -> Self {
        self.media = media;
        self
    }

    /// Attach a music track
    #[must_use]
    pub fn with_music(mut self, music: MusicTrack) -> Self {
        self.music = Some(music);
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of media items
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Check if the episode has no media at all
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Check if a music track is attached
    pub fn has_music(&self) -> bool {
        self.music.is_some()
    }
}
