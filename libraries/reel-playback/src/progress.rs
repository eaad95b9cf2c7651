//! Whole-episode progress bar
//!
//! Every item gets an equal share of the bar (`100 / total_items`),
//! whatever its real duration. Photos fill their share from elapsed/duration,
//! videos from position/duration reported by the player.

use crate::session::PlaybackSession;

/// Derives the 0-100 progress value
#[derive(Debug, Clone, Copy)]
pub struct ProgressTracker {
    total_items: usize,
}

impl ProgressTracker {
    /// Create a tracker for an episode with `total_items` media
    pub fn new(total_items: usize) -> Self {
        Self { total_items }
    }

    /// Width of one item's share, in percent
    pub fn item_width(&self) -> f64 {
        if self.total_items == 0 {
            0.0
        } else {
            100.0 / self.total_items as f64
        }
    }

    /// Bar position where item `index` starts
    pub fn offset(&self, index: usize) -> f64 {
        self.global(index, 0.0)
    }

    /// Bar position for `index` with `fraction` of it played
    ///
    /// `fraction` is clamped into [0, 1]; the result never exceeds 100.
    pub fn global(&self, index: usize, fraction: f64) -> f64 {
        if self.total_items == 0 {
            return 0.0;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        ((index as f64 + fraction) * 100.0 / self.total_items as f64).min(100.0)
    }

    /// Apply a completion report for the current item
    ///
    /// Within one item the bar only moves forward. Returns true if it moved.
    pub fn report(&self, session: &mut PlaybackSession, fraction: f64) -> bool {
        let value = self.global(session.media_index, fraction);
        if value > session.progress {
            session.progress = value;
            true
        } else {
            false
        }
    }

    /// Position the bar at the start of a newly current item
    ///
    /// Moving forward never lowers the bar; moving back (manual seek) sets
    /// it to exactly that item's starting offset.
    pub fn enter_item(&self, session: &mut PlaybackSession, previous: usize) {
        let offset = self.offset(session.media_index);
        if session.media_index >= previous {
            session.progress = session.progress.max(offset);
        } else {
            session.progress = offset;
        }
    }

    /// Bar full (episode ended)
    pub fn complete(&self, session: &mut PlaybackSession) {
        session.progress = 100.0;
    }
}

/// Fraction of a video played, if the reported duration is usable
pub fn video_fraction(position: std::time::Duration, duration: std::time::Duration) -> Option<f64> {
    let total = duration.as_secs_f64();
    if total > 0.0 && total.is_finite() {
        Some(position.as_secs_f64() / total)
    } else {
        None
    }
}
