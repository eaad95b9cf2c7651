//! End-of-episode handling
//!
//! Once the last item has played the session freezes and a 1-second
//! countdown starts. Expiry behaves like "play next": the next episode if
//! the series has one, the series overview otherwise.

use reel_core::NavigationRequest;
use std::time::Duration;
use tracing::info;

use crate::{
    session::PlaybackSession,
    timer::{Scheduler, TimerId, TimerKind},
    types::EpisodeContext,
};

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Seconds left
    Remaining(u32),
    /// Reached zero; the timer is already cancelled
    Expired,
}

/// Countdown and next-target decision
#[derive(Debug)]
pub struct EndOfEpisodeController {
    context: EpisodeContext,
    countdown_from: u32,
    timer: Option<TimerId>,
}

impl EndOfEpisodeController {
    /// Create a controller for an episode at `context`
    pub fn new(context: EpisodeContext, countdown_from: u32) -> Self {
        Self {
            context,
            countdown_from,
            timer: None,
        }
    }

    /// Freeze the session and start the countdown
    ///
    /// The caller stops the photo tick first; the two never run together.
    pub fn enter(&mut self, session: &mut PlaybackSession, scheduler: &mut Scheduler) {
        session.ended = true;
        session.playing = false;
        session.countdown = self.countdown_from;

        self.cancel(scheduler);
        self.timer = Some(scheduler.schedule_repeating(TimerKind::Countdown, COUNTDOWN_TICK));

        info!(
            episode = self.context.episode_index,
            next = self.context.has_next_episode(),
            countdown = self.countdown_from,
            "Episode ended"
        );
    }

    /// Handle a fired `Countdown` timer
    ///
    /// Returns `None` for a timer this controller no longer owns.
    pub fn on_tick(
        &mut self,
        id: TimerId,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
    ) -> Option<CountdownTick> {
        if self.timer != Some(id) {
            return None;
        }

        session.countdown = session.countdown.saturating_sub(1);
        if session.countdown == 0 {
            self.cancel(scheduler);
            info!(episode = self.context.episode_index, "Countdown expired");
            Some(CountdownTick::Expired)
        } else {
            Some(CountdownTick::Remaining(session.countdown))
        }
    }

    /// Stop the countdown
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Check if the countdown is running
    pub fn is_counting(&self) -> bool {
        self.timer.is_some()
    }

    /// Check if the series continues after this episode
    pub fn has_next_episode(&self) -> bool {
        self.context.has_next_episode()
    }

    /// Where "play next" goes
    pub fn next_target(&self) -> NavigationRequest {
        let series_id = self.context.series_id.clone();
        if self.context.has_next_episode() {
            NavigationRequest::Episode {
                series_id,
                index: self.context.episode_index + 1,
            }
        } else {
            NavigationRequest::SeriesOverview { series_id }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::SeriesId;

    fn controller(index: usize, total: usize) -> EndOfEpisodeController {
        EndOfEpisodeController::new(EpisodeContext::new(SeriesId::new("trip"), index, total), 10)
    }

    fn run_countdown(
        end: &mut EndOfEpisodeController,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
    ) -> Vec<CountdownTick> {
        let mut ticks = Vec::new();
        while let Some((id, _)) = scheduler.pop_due(scheduler.now() + Duration::from_secs(2)) {
            ticks.push(end.on_tick(id, session, scheduler).unwrap());
        }
        ticks
    }

    #[test]
    fn enter_freezes_session() {
        let mut end = controller(0, 2);
        let mut session = PlaybackSession::new(10);
        session.rewind(10);
        let mut scheduler = Scheduler::new();

        end.enter(&mut session, &mut scheduler);

        assert!(session.ended);
        assert!(!session.playing);
        assert_eq!(session.countdown, 10);
        assert!(scheduler.has_live(TimerKind::Countdown));
    }

    #[test]
    fn countdown_expires_after_ten_seconds() {
        let mut end = controller(1, 5);
        let mut session = PlaybackSession::new(10);
        let mut scheduler = Scheduler::new();
        end.enter(&mut session, &mut scheduler);

        let ticks = run_countdown(&mut end, &mut session, &mut scheduler);

        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0], CountdownTick::Remaining(9));
        assert_eq!(ticks[9], CountdownTick::Expired);
        assert_eq!(scheduler.now(), Duration::from_secs(10));
        assert!(!end.is_counting());
    }

    #[test]
    fn next_target_is_next_episode() {
        let end = controller(1, 5);
        assert_eq!(
            end.next_target(),
            NavigationRequest::Episode {
                series_id: SeriesId::new("trip"),
                index: 2
            }
        );
    }

    #[test]
    fn last_episode_goes_to_overview() {
        let end = controller(4, 5);
        assert!(!end.has_next_episode());
        assert_eq!(
            end.next_target(),
            NavigationRequest::SeriesOverview {
                series_id: SeriesId::new("trip")
            }
        );
    }

    #[test]
    fn cancelled_countdown_ignores_stale_tick() {
        let mut end = controller(0, 3);
        let mut session = PlaybackSession::new(10);
        let mut scheduler = Scheduler::new();
        end.enter(&mut session, &mut scheduler);

        let (id, _) = scheduler.pop_due(Duration::from_secs(1)).unwrap();
        end.cancel(&mut scheduler);

        assert_eq!(end.on_tick(id, &mut session, &mut scheduler), None);
        assert_eq!(scheduler.live_count(), 0);
    }
}
