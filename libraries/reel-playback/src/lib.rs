//! Reel - Playback Engine
//!
//! Platform-agnostic playback engine for the Reel documentary player.
//!
//! This crate provides:
//! - Media sequencing (timed photos, self-timed videos)
//! - A continuous whole-episode progress value
//! - Two-phase exit/enter transitions with a seeded style choice
//! - Background music against per-video audio, with persisted volume/mute
//! - End-of-episode countdown, replay and auto-advance
//! - Keyboard bindings and a controls idle timer
//!
//! # Architecture
//!
//! `reel-playback` never touches a real clock, a DOM or an audio device:
//! - Timers run on a virtual clock the host advances (`advance_clock`)
//! - Media elements are reached through the `MediaOutput` trait
//! - Volume and mute go through an injected `SettingsStore`
//! - Navigation is requested through `PlayerEvent::NavigationRequested`
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Episode, MediaItem, SeriesId};
//! use reel_playback::{EngineConfig, EpisodeContext, PlayerEngine, PlayerEvent};
//! use reel_storage::MemorySettingsStore;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let episode = Episode::new("day-1", "Day One").with_media(vec![
//!     MediaItem::photo("p1", "/media/p1.jpg"),
//!     MediaItem::photo("p2", "/media/p2.jpg"),
//! ]);
//! let context = EpisodeContext::new(SeriesId::new("trip"), 0, 1);
//! let store = Arc::new(MemorySettingsStore::new());
//!
//! let mut engine = PlayerEngine::new(episode, context, EngineConfig::default(), store).unwrap();
//! engine.start();
//!
//! // Drive the clock from the host's frame loop
//! engine.advance_clock(Duration::from_secs(11));
//! assert!(engine.session().is_ended());
//!
//! for event in engine.drain_events() {
//!     if let PlayerEvent::NavigationRequested(route) = event {
//!         println!("navigate to {}", route);
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audio;
pub mod end_of_episode;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod loader;
pub mod output;
pub mod progress;
pub mod sequencer;
pub mod session;
pub mod timer;
pub mod transition;
pub mod types;
pub mod view;
mod volume;

pub use audio::AudioController;
pub use end_of_episode::{CountdownTick, EndOfEpisodeController};
pub use engine::PlayerEngine;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use input::{InputController, InputEvent, Key, PlayerCommand};
pub use loader::open_episode;
pub use output::MediaOutput;
pub use progress::ProgressTracker;
pub use sequencer::{Advance, MediaSequencer};
pub use session::{PlaybackSession, SessionPhase};
pub use timer::{Scheduler, TimerId, TimerKind};
pub use transition::{PhaseChange, TransitionCoordinator};
pub use types::{AudioSource, EngineConfig, EpisodeContext, TransitionState, TransitionStyle};
pub use view::{DotState, EndAction, EndScreen, PlayerView};
