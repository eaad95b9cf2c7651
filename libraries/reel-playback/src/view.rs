//! Render snapshot for the presentation layer

use serde::{Deserialize, Serialize};

use crate::{session::SessionPhase, types::TransitionState};
use reel_core::MediaItem;

/// State of one position dot under the media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotState {
    /// Current item
    Active,
    /// Already shown
    Viewed,
    /// Not reached yet
    Upcoming,
}

impl DotState {
    /// Dot state for `index` with `current` shown
    pub fn for_index(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => DotState::Viewed,
            std::cmp::Ordering::Equal => DotState::Active,
            std::cmp::Ordering::Greater => DotState::Upcoming,
        }
    }
}

/// Primary action on the end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndAction {
    /// "Next Episode"
    NextEpisode,
    /// "Back to Series"
    BackToSeries,
}

/// End screen contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndScreen {
    /// Primary action
    pub action: EndAction,
    /// Seconds shown next to "Next Episode"
    pub countdown: Option<u32>,
}

/// Everything the player screen shows, at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// Episode title
    pub title: String,
    /// Episode description
    pub description: String,
    /// "Episode N"
    pub episode_label: String,
    /// Visible item
    pub current: Option<MediaItem>,
    /// "i / N"
    pub counter: String,
    /// One dot per item; empty for single-item episodes
    pub dots: Vec<DotState>,
    /// Previous button enabled
    pub can_go_previous: bool,
    /// Next button enabled
    pub can_go_next: bool,
    /// Playing flag
    pub playing: bool,
    /// Progress in [0, 100]
    pub progress: f64,
    /// Transition phase of the visible item
    pub transition: TransitionState,
    /// Audio source toggle offered (video item and a music track)
    pub show_audio_toggle: bool,
    /// Music label, if the episode has music
    pub music_label: Option<String>,
    /// Volume in [0, 1]
    pub volume: f32,
    /// Mute flag
    pub muted: bool,
    /// End screen, once the episode has ended
    pub end_screen: Option<EndScreen>,
    /// Controls overlay shown
    pub controls_visible: bool,
    /// Fullscreen requested
    pub fullscreen: bool,
}

impl PlayerView {
    /// Dot row for `count` items with `current` shown
    pub fn dots(count: usize, current: usize) -> Vec<DotState> {
        if count <= 1 {
            return Vec::new();
        }
        (0..count).map(|i| DotState::for_index(i, current)).collect()
    }
}
