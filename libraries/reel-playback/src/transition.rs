//! Two-phase exit/enter transitions
//!
//! `Idle -> Exiting -> Entering -> Idle`, one timer per phase. The style is
//! drawn once when the transition starts and both phases use it. Requests
//! while a transition runs are rejected.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::time::Duration;
use tracing::debug;

use crate::{
    session::PlaybackSession,
    timer::{Scheduler, TimerId, TimerKind},
    types::{EngineConfig, TransitionState, TransitionStyle},
};

/// Outcome of a finished transition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    /// Exit finished; `index` is now the visible item
    Entered {
        /// Style of this transition
        style: TransitionStyle,
        /// Old index
        previous: usize,
        /// New index
        index: usize,
    },
    /// Entry finished; back to idle
    Settled,
}

/// Transition state machine driver
#[derive(Debug)]
pub struct TransitionCoordinator {
    rng: StdRng,
    styles: Vec<TransitionStyle>,
    duration: Duration,
    timer: Option<TimerId>,
}

impl TransitionCoordinator {
    /// Create a coordinator; a configured seed makes style choice repeatable
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            styles: config.transition_styles.clone(),
            duration: config.transition_duration(),
            timer: None,
        }
    }

    /// Start a transition to `target`
    ///
    /// Returns the chosen style, or `None` if a transition is already
    /// running (the request is dropped).
    pub fn request(
        &mut self,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
        target: usize,
    ) -> Option<TransitionStyle> {
        if !session.transition.is_idle() {
            debug!(index = target, "Transition request rejected, already transitioning");
            return None;
        }

        let style = self
            .styles
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(TransitionStyle::Fade);
        session.transition = TransitionState::Exiting { style, target };
        self.schedule(scheduler);

        debug!(style = style.name(), index = target, "Transition exiting");
        Some(style)
    }

    /// Handle a fired `TransitionPhase` timer
    ///
    /// Returns `None` for a timer this coordinator no longer owns.
    pub fn on_phase_elapsed(
        &mut self,
        id: TimerId,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
    ) -> Option<PhaseChange> {
        if self.timer != Some(id) {
            return None;
        }
        self.timer = None;
        Some(self.complete_phase(session, scheduler))
    }

    /// Run the current phase to its end without waiting for the timer
    pub fn finish_phase(
        &mut self,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
    ) -> Option<PhaseChange> {
        if session.transition.is_idle() {
            return None;
        }
        self.cancel_timer(scheduler);
        Some(self.complete_phase(session, scheduler))
    }

    /// Abort any transition and return to idle
    pub fn cancel(&mut self, session: &mut PlaybackSession, scheduler: &mut Scheduler) {
        self.cancel_timer(scheduler);
        session.transition = TransitionState::Idle;
    }

    /// Check if a phase timer is live
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn complete_phase(
        &mut self,
        session: &mut PlaybackSession,
        scheduler: &mut Scheduler,
    ) -> PhaseChange {
        match session.transition {
            TransitionState::Exiting { style, target } => {
                let previous = session.media_index;
                session.media_index = target;
                session.transition = TransitionState::Entering { style };
                self.schedule(scheduler);
                debug!(style = style.name(), index = target, "Transition entering");
                PhaseChange::Entered {
                    style,
                    previous,
                    index: target,
                }
            }
            TransitionState::Entering { .. } | TransitionState::Idle => {
                session.transition = TransitionState::Idle;
                PhaseChange::Settled
            }
        }
    }

    fn schedule(&mut self, scheduler: &mut Scheduler) {
        self.cancel_timer(scheduler);
        self.timer = Some(scheduler.schedule_once(TimerKind::TransitionPhase, self.duration));
    }

    fn cancel_timer(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }
}
