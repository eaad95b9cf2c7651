//! Media sequencing
//!
//! Owns the ordered media list and the photo timing. Photos run on a
//! recurring tick that measures elapsed display time against a fixed
//! duration; videos have no timer and complete when the host reports
//! the element ended.

use reel_core::{MediaItem, MediaKind};
use std::time::Duration;

use crate::{
    session::PlaybackSession,
    timer::{Scheduler, TimerId, TimerKind},
    types::EngineConfig,
};

/// What completing the current item leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move to this index
    To(usize),
    /// Current item was the last one
    Exhausted,
}

/// Result of one photo tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoTick {
    /// Share of the photo's display time elapsed, in [0, 1]
    pub fraction: f64,
    /// Display time is used up
    pub complete: bool,
}

/// Ordered media list plus photo timing
#[derive(Debug)]
pub struct MediaSequencer {
    media: Vec<MediaItem>,
    photo_duration: Duration,
    tick_interval: Duration,

    /// Live `PhotoTick` timer
    photo_timer: Option<TimerId>,

    /// Display time accumulated before the last pause
    photo_elapsed: Duration,

    /// Clock time the running stretch started at
    photo_started_at: Option<Duration>,
}

impl MediaSequencer {
    /// Create a sequencer over an episode's media
    pub fn new(media: Vec<MediaItem>, config: &EngineConfig) -> Self {
        Self {
            media,
            photo_duration: config.photo_duration(),
            tick_interval: config.tick_interval(),
            photo_timer: None,
            photo_elapsed: Duration::ZERO,
            photo_started_at: None,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.media.len()
    }

    /// Check if the episode has no media
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// All items in playback order
    pub fn items(&self) -> &[MediaItem] {
        &self.media
    }

    /// Item at `index`
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.media.get(index)
    }

    /// Item the session currently shows
    pub fn current(&self, session: &PlaybackSession) -> Option<&MediaItem> {
        self.media.get(session.media_index)
    }

    /// Kind of the current item
    pub fn current_kind(&self, session: &PlaybackSession) -> Option<MediaKind> {
        self.current(session).map(|item| item.kind)
    }

    /// Check if `index` is the final item
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.media.len()
    }

    /// Where completing the current item goes
    pub fn next_step(&self, session: &PlaybackSession) -> Advance {
        if self.is_last(session.media_index) {
            Advance::Exhausted
        } else {
            Advance::To(session.media_index + 1)
        }
    }

    /// Validate a manual seek
    ///
    /// Returns `None` for the current index or an index past the end.
    pub fn seek_target(&self, session: &PlaybackSession, index: usize) -> Option<usize> {
        if index == session.media_index || index >= self.media.len() {
            None
        } else {
            Some(index)
        }
    }

    /// Reset timing for a newly current item
    pub fn begin_item(&mut self, scheduler: &mut Scheduler) {
        self.cancel_timer(scheduler);
        self.photo_elapsed = Duration::ZERO;
        self.photo_started_at = None;
    }

    /// Start (or resume) the photo tick if the current item is a photo
    ///
    /// Resuming continues from the display time already accumulated.
    /// Returns true if a tick is running afterwards.
    pub fn start_timing(&mut self, session: &PlaybackSession, scheduler: &mut Scheduler) -> bool {
        if self.current_kind(session) != Some(MediaKind::Photo) {
            return false;
        }
        if self.photo_timer.is_none() {
            self.photo_started_at = Some(scheduler.now());
            self.photo_timer =
                Some(scheduler.schedule_repeating(TimerKind::PhotoTick, self.tick_interval));
        }
        true
    }

    /// Stop the tick, keeping the display time accumulated so far
    pub fn pause_timing(&mut self, scheduler: &mut Scheduler) {
        if let Some(started) = self.photo_started_at.take() {
            self.photo_elapsed += scheduler.now().saturating_sub(started);
        }
        self.cancel_timer(scheduler);
    }

    /// Stop the tick and forget the accumulated display time
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        self.begin_item(scheduler);
    }

    /// Check if the photo tick is running
    pub fn is_timing(&self) -> bool {
        self.photo_timer.is_some()
    }

    /// Display time of the current photo at clock time `now`
    pub fn photo_elapsed(&self, now: Duration) -> Duration {
        let running = self
            .photo_started_at
            .map_or(Duration::ZERO, |started| now.saturating_sub(started));
        self.photo_elapsed + running
    }

    /// Handle a fired `PhotoTick`
    ///
    /// Returns `None` if `id` is not this sequencer's live timer. On
    /// completion the tick is cancelled before returning.
    pub fn on_tick(&mut self, id: TimerId, scheduler: &mut Scheduler) -> Option<PhotoTick> {
        if self.photo_timer != Some(id) {
            return None;
        }

        let elapsed = self.photo_elapsed(scheduler.now());
        let fraction = (elapsed.as_secs_f64() / self.photo_duration.as_secs_f64()).min(1.0);
        let complete = elapsed >= self.photo_duration;
        if complete {
            self.pause_timing(scheduler);
        }

        Some(PhotoTick { fraction, complete })
    }

    fn cancel_timer(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.photo_timer.take() {
            scheduler.cancel(id);
        }
    }
}
