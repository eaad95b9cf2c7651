//! Volume control shared by the music handle and the video element
//!
//! A single volume/mute pair applies to whichever source is audible.
//! Volume range is linear 0.0-1.0, the same scale the browser media
//! elements take.

use reel_core::PlayerSettings;

/// Volume controller
///
/// Mute preserves the level so unmuting restores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Linear level in [0, 1]
    level: f32,

    /// Mute state
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial level, clamped into [0, 1]
    pub fn new(level: f32) -> Self {
        Self {
            level: PlayerSettings::new(level, false).volume,
            muted: false,
        }
    }

    /// Set volume level (clamped into [0, 1])
    pub fn set_level(&mut self, level: f32) {
        self.level = PlayerSettings::new(level, self.muted).volume;
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Set mute state
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Snapshot for persistence
    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings::new(self.level, self.muted)
    }
}

impl From<PlayerSettings> for Volume {
    fn from(settings: PlayerSettings) -> Self {
        let mut volume = Self::new(settings.volume);
        volume.muted = settings.muted;
        volume
    }
}
