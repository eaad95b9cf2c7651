//! Cooperative timer scheduling on a virtual clock
//!
//! The engine never sleeps or spawns threads. The host moves the clock
//! forward with `PlayerEngine::advance_clock` (from its frame loop, a
//! `setInterval`, or a test) and every timer that falls due in that window
//! fires in due-time order. Cancelled timers are removed outright, so a
//! cancelled timer can never fire into a later session.

use std::time::Duration;

/// Smallest period a repeating timer may have
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Recurring photo progress tick
    PhotoTick,
    /// One exit or entry phase of a transition
    TransitionPhase,
    /// 1-second end-of-episode countdown tick
    Countdown,
    /// Pointer inactivity timeout for the controls overlay
    ControlsIdle,
}

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

/// Virtual-time timer queue
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    /// Create a scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire once after `delay` (zero fires on the next clock advance)
    pub fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerId {
        self.insert(kind, self.now + delay, None)
    }

    /// Fire every `period`, first after one full period
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(kind, self.now + period, Some(period))
    }

    fn insert(&mut self, kind: TimerKind, due: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            due,
            period,
        });
        id
    }

    /// Cancel one timer; returns false if it was not live
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer of a kind; returns how many were live
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.kind != kind);
        before - self.timers.len()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Check if a timer is still scheduled
    pub fn is_live(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Check if any timer of a kind is scheduled
    pub fn has_live(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Number of scheduled timers
    pub fn live_count(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest timer
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Pop the earliest timer due at or before `deadline`
    ///
    /// Moves the clock to that timer's due time. Repeating timers are
    /// re-armed one period later. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, TimerKind)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(pos, _)| pos)?;

        let Timer {
            id,
            kind,
            due,
            period,
        } = self.timers[pos].clone();
        self.now = self.now.max(due);

        match period {
            Some(period) => self.timers[pos].due = due + period,
            None => {
                self.timers.swap_remove(pos);
            }
        }
        Some((id, kind))
    }

    /// Move the clock to `deadline` (never backwards)
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
