//! Player events
//!
//! Event-based communication for UI synchronization. The engine records an
//! event at each observable change and the host drains them after every
//! call (or once per frame):
//! - Session lifecycle (started, intro, no media, stopped, replayed)
//! - Play/pause and item changes
//! - Transition phases
//! - Progress, end of episode and countdown ticks
//! - Navigation requests for the routing collaborator
//! - Volume, audio source, controls and fullscreen changes

use reel_core::{MediaKind, NavigationRequest};
use serde::{Deserialize, Serialize};

use crate::types::{AudioSource, TransitionStyle};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Playback of the episode began at item 0
    SessionStarted {
        /// Episode being played
        episode_id: String,
        /// Number of media items
        media_count: usize,
    },

    /// Intro overlay is up; playback waits for `dismiss_intro`
    IntroShown,

    /// Episode has no media; only the edit flow is offered
    NoMedia,

    /// Play/pause state changed
    StateChanged {
        /// New state
        playing: bool,
    },

    /// A transition started
    TransitionStarted {
        /// Style used for both phases
        style: TransitionStyle,
        /// Index animating out
        from: usize,
        /// Index that becomes current after the exit phase
        to: usize,
    },

    /// Visible item changed (exit phase finished)
    ItemChanged {
        /// New index
        index: usize,
        /// Kind of the new item
        kind: MediaKind,
        /// Previous index
        previous: usize,
    },

    /// Entry phase finished; transitions accepted again
    TransitionFinished {
        /// Index now shown
        index: usize,
    },

    /// Progress bar moved
    ProgressChanged {
        /// Whole-episode progress in [0, 100]
        progress: f64,
    },

    /// Current item failed to load or play and was skipped
    MediaFailed {
        /// Index of the failed item
        index: usize,
    },

    /// Last item finished; countdown running
    Ended,

    /// Countdown ticked
    CountdownTick {
        /// Seconds left
        remaining: u32,
    },

    /// The engine asks the host to navigate
    NavigationRequested(NavigationRequest),

    /// Volume or mute changed
    VolumeChanged {
        /// Linear level in [0, 1]
        volume: f32,
        /// Mute state
        muted: bool,
    },

    /// Audio source selection flipped
    AudioSourceChanged {
        /// New selection
        source: AudioSource,
        /// Whether the flip changes what is heard right now
        audible: bool,
    },

    /// Controls overlay shown or hidden
    ControlsVisibilityChanged {
        /// New visibility
        visible: bool,
    },

    /// Fullscreen presentation toggled
    FullscreenChanged {
        /// New state
        fullscreen: bool,
    },

    /// Session rewound to item 0 from the end screen
    Replayed,

    /// Session torn down
    Stopped,
}

impl PlayerEvent {
    /// Navigation request carried by this event, if any
    pub fn navigation(&self) -> Option<&NavigationRequest> {
        match self {
            PlayerEvent::NavigationRequested(request) => Some(request),
            _ => None,
        }
    }
}
