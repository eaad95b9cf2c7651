//! Mutable playback state for one mounted episode
//!
//! Owned exclusively by `PlayerEngine`. Timer handlers receive the engine and
//! read this one object, so there are no shadow copies that could go stale.

use serde::{Deserialize, Serialize};

use crate::types::{AudioSource, TransitionState};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed, `start` not called yet
    #[default]
    Created,
    /// Intro overlay shown, waiting to be dismissed
    Intro,
    /// Sequencing media (includes the ended state)
    Active,
    /// Episode has no media; only the edit flow is offered
    NoMedia,
    /// Torn down; every timer is cancelled
    Stopped,
}

/// Live playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    pub(crate) phase: SessionPhase,
    pub(crate) media_index: usize,
    pub(crate) playing: bool,
    pub(crate) progress: f64,
    pub(crate) transition: TransitionState,
    pub(crate) audio_source: AudioSource,
    pub(crate) ended: bool,
    pub(crate) countdown: u32,
    pub(crate) controls_visible: bool,
    pub(crate) fullscreen: bool,
}

impl PlaybackSession {
    pub(crate) fn new(countdown: u32) -> Self {
        Self {
            phase: SessionPhase::Created,
            media_index: 0,
            playing: false,
            progress: 0.0,
            transition: TransitionState::Idle,
            audio_source: AudioSource::Music,
            ended: false,
            countdown,
            controls_visible: true,
            fullscreen: false,
        }
    }

    /// Put the session at the start of the episode, playing
    pub(crate) fn rewind(&mut self, countdown: u32) {
        self.phase = SessionPhase::Active;
        self.media_index = 0;
        self.playing = true;
        self.progress = 0.0;
        self.transition = TransitionState::Idle;
        self.ended = false;
        self.countdown = countdown;
    }

    /// Lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Index of the visible item
    pub fn media_index(&self) -> usize {
        self.media_index
    }

    /// Check if playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whole-episode progress in [0, 100]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current transition phase
    pub fn transition(&self) -> TransitionState {
        self.transition
    }

    /// Audio source selection
    pub fn audio_source(&self) -> AudioSource {
        self.audio_source
    }

    /// Check if the last item has fully played
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Remaining countdown seconds (meaningful while ended)
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Check if the controls overlay is shown
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Check if fullscreen presentation is requested
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Check if the session is sequencing media and not ended
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Active && !self.ended
    }
}
