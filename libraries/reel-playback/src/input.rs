//! Keyboard and pointer input
//!
//! Bindings exist only between `attach` and `detach`, which the engine calls
//! on session start and teardown. A detached controller translates nothing.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::{
    session::PlaybackSession,
    timer::{Scheduler, TimerId, TimerKind},
};

/// Keys the player reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Space bar
    Space,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// `M`
    KeyM,
    /// `A`
    KeyA,
    /// `F`
    KeyF,
    /// Escape
    Escape,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyM" => Some(Key::KeyM),
            "KeyA" => Some(Key::KeyA),
            "KeyF" => Some(Key::KeyF),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Raw input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(Key),
    /// The pointer moved over the player
    PointerMoved,
}

/// Engine operation a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Space
    TogglePlayPause,
    /// Left arrow: `goTo(index - 1)`
    Previous,
    /// Right arrow: `goTo(index + 1)`
    Next,
    /// M
    ToggleMute,
    /// A
    ToggleAudioSource,
    /// F
    ToggleFullscreen,
    /// Escape: back to the series overview
    ExitToOverview,
}

impl From<Key> for PlayerCommand {
    fn from(key: Key) -> Self {
        match key {
            Key::Space => PlayerCommand::TogglePlayPause,
            Key::ArrowLeft => PlayerCommand::Previous,
            Key::ArrowRight => PlayerCommand::Next,
            Key::KeyM => PlayerCommand::ToggleMute,
            Key::KeyA => PlayerCommand::ToggleAudioSource,
            Key::KeyF => PlayerCommand::ToggleFullscreen,
            Key::Escape => PlayerCommand::ExitToOverview,
        }
    }
}

/// Key bindings and the controls idle timer
#[derive(Debug)]
pub struct InputController {
    attached: bool,
    idle_timeout: Duration,
    idle_timer: Option<TimerId>,
}

impl InputController {
    /// Create a detached controller
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            attached: false,
            idle_timeout,
            idle_timer: None,
        }
    }

    /// Register the bindings for a session
    pub fn attach(&mut self) {
        if !self.attached {
            debug!("Input bindings attached");
        }
        self.attached = true;
    }

    /// Unregister the bindings and drop the idle timer
    pub fn detach(&mut self, scheduler: &mut Scheduler) {
        if self.attached {
            debug!("Input bindings detached");
        }
        self.attached = false;
        if let Some(id) = self.idle_timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Check if bindings are registered
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Map a key to a command (nothing while detached)
    pub fn translate(&self, key: Key) -> Option<PlayerCommand> {
        self.attached.then(|| PlayerCommand::from(key))
    }

    /// Pointer moved: show controls and restart the idle timer
    ///
    /// Returns true if the controls were hidden before.
    pub fn pointer_moved(&mut self, session: &mut PlaybackSession, scheduler: &mut Scheduler) -> bool {
        if !self.attached {
            return false;
        }
        if let Some(id) = self.idle_timer.take() {
            scheduler.cancel(id);
        }
        self.idle_timer = Some(scheduler.schedule_once(TimerKind::ControlsIdle, self.idle_timeout));

        let was_hidden = !session.controls_visible;
        session.controls_visible = true;
        was_hidden
    }

    /// Handle a fired `ControlsIdle` timer
    ///
    /// Controls hide only while playing. Returns true if they were hidden now.
    pub fn on_idle_elapsed(&mut self, id: TimerId, session: &mut PlaybackSession) -> bool {
        if self.idle_timer != Some(id) {
            return false;
        }
        self.idle_timer = None;

        if session.playing && session.controls_visible {
            session.controls_visible = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_session() -> PlaybackSession {
        let mut session = PlaybackSession::new(10);
        session.rewind(10);
        session
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("KeyF"), Some(Key::KeyF));
        assert_eq!(Key::from_code("KeyQ"), None);
    }

    #[test]
    fn bindings_table() {
        let mut input = InputController::new(Duration::from_secs(3));
        input.attach();

        assert_eq!(input.translate(Key::Space), Some(PlayerCommand::TogglePlayPause));
        assert_eq!(input.translate(Key::ArrowLeft), Some(PlayerCommand::Previous));
        assert_eq!(input.translate(Key::ArrowRight), Some(PlayerCommand::Next));
        assert_eq!(input.translate(Key::KeyM), Some(PlayerCommand::ToggleMute));
        assert_eq!(input.translate(Key::KeyA), Some(PlayerCommand::ToggleAudioSource));
        assert_eq!(input.translate(Key::KeyF), Some(PlayerCommand::ToggleFullscreen));
        assert_eq!(input.translate(Key::Escape), Some(PlayerCommand::ExitToOverview));
    }

    #[test]
    fn detached_translates_nothing() {
        let mut scheduler = Scheduler::new();
        let mut input = InputController::new(Duration::from_secs(3));
        assert_eq!(input.translate(Key::Space), None);

        input.attach();
        input.detach(&mut scheduler);
        assert_eq!(input.translate(Key::Space), None);
    }

    #[test]
    fn controls_hide_after_idle_while_playing() {
        let mut scheduler = Scheduler::new();
        let mut session = playing_session();
        let mut input = InputController::new(Duration::from_secs(3));
        input.attach();

        input.pointer_moved(&mut session, &mut scheduler);
        let (id, kind) = scheduler.pop_due(Duration::from_secs(3)).unwrap();
        assert_eq!(kind, TimerKind::ControlsIdle);

        assert!(input.on_idle_elapsed(id, &mut session));
        assert!(!session.controls_visible);

        assert!(input.pointer_moved(&mut session, &mut scheduler));
        assert!(session.controls_visible);
    }

    #[test]
    fn controls_stay_while_paused() {
        let mut scheduler = Scheduler::new();
        let mut session = playing_session();
        session.playing = false;
        let mut input = InputController::new(Duration::from_secs(3));
        input.attach();

        input.pointer_moved(&mut session, &mut scheduler);
        let (id, _) = scheduler.pop_due(Duration::from_secs(3)).unwrap();

        assert!(!input.on_idle_elapsed(id, &mut session));
        assert!(session.controls_visible);
    }

    #[test]
    fn movement_restarts_idle_timer() {
        let mut scheduler = Scheduler::new();
        let mut session = playing_session();
        let mut input = InputController::new(Duration::from_secs(3));
        input.attach();

        input.pointer_moved(&mut session, &mut scheduler);
        scheduler.advance_to(Duration::from_secs(2));
        input.pointer_moved(&mut session, &mut scheduler);

        assert_eq!(scheduler.live_count(), 1);
        assert_eq!(scheduler.next_due(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn detach_cancels_idle_timer() {
        let mut scheduler = Scheduler::new();
        let mut session = playing_session();
        let mut input = InputController::new(Duration::from_secs(3));
        input.attach();
        input.pointer_moved(&mut session, &mut scheduler);

        input.detach(&mut scheduler);
        assert_eq!(scheduler.live_count(), 0);
    }
}
