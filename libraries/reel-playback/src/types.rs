//! Core types for the playback engine

use reel_core::SeriesId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PlaybackError, Result};

/// Visual style of an item transition
///
/// One style is chosen per transition and used for both the exit and the
/// entry phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionStyle {
    /// Cross-fade through black
    Fade,
    /// Horizontal slide
    SlideLeft,
    /// Vertical slide
    SlideUp,
    /// Scale in/out
    Zoom,
    /// Blur in/out
    Blur,
}

impl TransitionStyle {
    /// All styles, in presentation order
    pub const ALL: [TransitionStyle; 5] = [
        TransitionStyle::Fade,
        TransitionStyle::SlideLeft,
        TransitionStyle::SlideUp,
        TransitionStyle::Zoom,
        TransitionStyle::Blur,
    ];

    /// Style name as used by the presentation layer
    pub fn name(&self) -> &'static str {
        match self {
            TransitionStyle::Fade => "fade",
            TransitionStyle::SlideLeft => "slide-left",
            TransitionStyle::SlideUp => "slide-up",
            TransitionStyle::Zoom => "zoom",
            TransitionStyle::Blur => "blur",
        }
    }

    /// Animation class for the outgoing item
    pub fn exit_class(&self) -> String {
        format!("exit-{}", self.name())
    }

    /// Animation class for the incoming item
    pub fn enter_class(&self) -> String {
        format!("enter-{}", self.name())
    }
}

/// Transition phase
///
/// Exclusive: the visible item index may only change on the
/// `Exiting` -> `Entering` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionState {
    /// No animation running
    #[default]
    Idle,

    /// Current item animating out
    Exiting {
        /// Style chosen at transition start
        style: TransitionStyle,
        /// Index that becomes current at the phase boundary
        target: usize,
    },

    /// New item animating in
    Entering {
        /// Same style as the exit phase
        style: TransitionStyle,
    },
}

impl TransitionState {
    /// Check if no transition is running
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle)
    }

    /// Check if the outgoing item is still animating
    pub fn is_exiting(&self) -> bool {
        matches!(self, TransitionState::Exiting { .. })
    }

    /// Animation class to apply to the visible item, if any
    pub fn animation_class(&self) -> Option<String> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Exiting { style, .. } => Some(style.exit_class()),
            TransitionState::Entering { style } => Some(style.enter_class()),
        }
    }
}

/// Which audio is audible while a video item is current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    /// Background music track
    #[default]
    Music,
    /// The video's own soundtrack
    Video,
}

impl AudioSource {
    /// The other source
    pub fn toggled(self) -> Self {
        match self {
            AudioSource::Music => AudioSource::Video,
            AudioSource::Video => AudioSource::Music,
        }
    }
}

/// Where the episode sits in its series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeContext {
    /// Owning series
    pub series_id: SeriesId,

    /// Zero-based index of this episode
    pub episode_index: usize,

    /// Number of episodes in the series
    pub total_episodes: usize,
}

impl EpisodeContext {
    /// Create a context
    pub fn new(series_id: SeriesId, episode_index: usize, total_episodes: usize) -> Self {
        Self {
            series_id,
            episode_index,
            total_episodes,
        }
    }

    /// Check if another episode follows this one
    pub fn has_next_episode(&self) -> bool {
        self.episode_index + 1 < self.total_episodes
    }

    /// One-based label ("Episode 3")
    pub fn label(&self) -> String {
        format!("Episode {}", self.episode_index + 1)
    }
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display time of a photo (default: 5000ms)
    pub photo_duration_ms: u64,

    /// Photo progress tick period (default: 50ms)
    pub tick_interval_ms: u64,

    /// Duration of each transition phase (default: 300ms)
    pub transition_duration_ms: u64,

    /// End-of-episode countdown start value (default: 10)
    pub countdown_seconds: u32,

    /// Pointer inactivity before controls hide (default: 3000ms)
    pub controls_idle_timeout_ms: u64,

    /// Styles a transition is drawn from (default: all five)
    pub transition_styles: Vec<TransitionStyle>,

    /// Seed for transition style selection (default: random)
    pub seed: Option<u64>,

    /// Hold playback behind an intro until dismissed (default: false)
    pub show_intro: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            photo_duration_ms: 5000,
            tick_interval_ms: 50,
            transition_duration_ms: 300,
            countdown_seconds: 10,
            controls_idle_timeout_ms: 3000,
            transition_styles: TransitionStyle::ALL.to_vec(),
            seed: None,
            show_intro: false,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.photo_duration_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "photo_duration_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms > self.photo_duration_ms {
            return Err(PlaybackError::InvalidConfig(format!(
                "tick_interval_ms ({}) exceeds photo_duration_ms ({})",
                self.tick_interval_ms, self.photo_duration_ms
            )));
        }
        if self.countdown_seconds == 0 {
            return Err(PlaybackError::InvalidConfig(
                "countdown_seconds must be positive".to_string(),
            ));
        }
        if self.transition_styles.is_empty() {
            return Err(PlaybackError::InvalidConfig(
                "transition_styles must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Photo display time
    pub fn photo_duration(&self) -> Duration {
        Duration::from_millis(self.photo_duration_ms)
    }

    /// Photo tick period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Transition phase duration
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Controls idle timeout
    pub fn controls_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.controls_idle_timeout_ms)
    }
}
