//! Process-wide player settings

use serde::{Deserialize, Serialize};

/// Volume and mute, shared by every playback session
///
/// Not scoped per series or episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Linear volume in [0, 1]
    pub volume: f32,

    /// Mute flag (preserves `volume`)
    pub muted: bool,
}

impl PlayerSettings {
    /// Create settings, clamping the volume into [0, 1]
    pub fn new(volume: f32, muted: bool) -> Self {
        Self {
            volume: clamp_volume(volume),
            muted,
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

/// Clamp a volume into [0, 1]; NaN maps to full volume
pub(crate) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        1.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
