//! Headless playback on a simulated clock
//!
//! Stands in for the browser: advances the engine clock in fixed steps,
//! plays every video for a fixed length, and follows the engine's
//! navigation requests from one episode to the next.

use crate::error::{CliError, Result};
use reel_core::{EpisodeSource, MediaKind, NavigationRequest, SeriesId};
use reel_playback::{open_episode, EngineConfig, PlayerEngine, PlayerEvent, SessionPhase};
use reel_storage::SettingsStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Extra simulated time allowed per episode before giving up
const STALL_SLACK: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Clock step per frame
    pub step: Duration,

    /// Length every simulated video plays for
    pub video_length: Duration,

    /// Episodes to play before stopping at the next navigation
    pub max_episodes: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(50),
            video_length: Duration::from_secs(8),
            max_episodes: 1,
        }
    }
}

/// What happened in one episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    pub episode_index: usize,
    pub episode_id: String,

    /// Indices in the order they became visible
    pub items_shown: Vec<usize>,

    /// Items skipped after a media failure
    pub items_failed: Vec<usize>,

    /// Simulated time from start until the engine asked to navigate
    pub elapsed: Duration,

    /// Where the engine asked to go
    pub route: NavigationRequest,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationReport {
    pub episodes: Vec<EpisodeReport>,
}

impl SimulationReport {
    /// Route requested by the last episode played
    pub fn final_route(&self) -> Option<&NavigationRequest> {
        self.episodes.last().map(|e| &e.route)
    }
}

/// Play `series_id` from `episode_index`, following auto-advance
pub fn run(
    source: &dyn EpisodeSource,
    store: Arc<dyn SettingsStore>,
    config: &EngineConfig,
    series_id: &SeriesId,
    episode_index: usize,
    options: &SimulationOptions,
) -> Result<SimulationReport> {
    let mut report = SimulationReport::default();
    let mut index = episode_index;

    loop {
        let mut routes: Vec<NavigationRequest> = Vec::new();
        let engine = open_episode(source, &mut routes, store.clone(), config.clone(), series_id, index)?;
        let episode = play_episode(engine, index, options)?;

        let next = match &episode.route {
            NavigationRequest::Episode { index: next, .. }
                if report.episodes.len() + 1 < options.max_episodes =>
            {
                Some(*next)
            }
            _ => None,
        };
        report.episodes.push(episode);

        match next {
            Some(next) => index = next,
            None => break,
        }
    }

    Ok(report)
}

/// Simulated video element state
struct VideoClock {
    index: usize,
    position: Duration,
}

fn play_episode(mut engine: PlayerEngine, index: usize, options: &SimulationOptions) -> Result<EpisodeReport> {
    let step = options.step.max(Duration::from_millis(1));
    let limit = stall_limit(&engine, options);
    let episode_id = engine.episode().id.clone();

    engine.start();
    info!(episode = %episode_id, index, "Playing episode");

    let mut items_shown = Vec::new();
    let mut items_failed = Vec::new();
    let mut video: Option<VideoClock> = None;

    match engine.session().phase() {
        SessionPhase::NoMedia => {
            warn!(episode = %episode_id, "Episode has no media, opening the editor");
            engine.request_edit_series();
        }
        SessionPhase::Intro => {
            debug!(episode = %episode_id, "Skipping intro");
            engine.dismiss_intro();
        }
        _ => {}
    }
    if engine.session().phase() == SessionPhase::Active {
        items_shown.push(engine.session().media_index());
    }

    let started = engine.now();
    loop {
        for event in engine.drain_events() {
            match event {
                PlayerEvent::ItemChanged { index, kind, .. } => {
                    info!(index, ?kind, "Showing item");
                    items_shown.push(index);
                }
                PlayerEvent::MediaFailed { index } => {
                    warn!(index, "Item skipped");
                    items_failed.push(index);
                }
                PlayerEvent::Ended => info!(episode = %episode_id, "Episode ended"),
                PlayerEvent::NavigationRequested(route) => {
                    let elapsed = engine.now() - started;
                    info!(route = %route, ?elapsed, "Leaving episode");
                    engine.stop();
                    return Ok(EpisodeReport {
                        episode_index: index,
                        episode_id,
                        items_shown,
                        items_failed,
                        elapsed,
                        route,
                    });
                }
                other => debug!(event = ?other, "Player event"),
            }
        }

        if engine.now() - started > limit {
            engine.stop();
            return Err(CliError::Stalled(format!(
                "episode {} did not finish within {:?}",
                episode_id, limit
            )));
        }

        engine.advance_clock(step);
        drive_video(&mut engine, &mut video, step, options.video_length);
    }
}

/// Feed time updates and the ended signal the way a video element would
fn drive_video(
    engine: &mut PlayerEngine,
    video: &mut Option<VideoClock>,
    step: Duration,
    length: Duration,
) {
    let session = engine.session();
    let current = session.media_index();
    let is_video = engine.current_item().map(|item| item.kind) == Some(MediaKind::Video);
    if !is_video || !session.is_running() || session.transition().is_exiting() {
        return;
    }
    let playing = session.is_playing();

    if video.as_ref().map(|clock| clock.index) != Some(current) {
        *video = Some(VideoClock {
            index: current,
            position: Duration::ZERO,
        });
    }
    if !playing {
        return;
    }
    let Some(clock) = video.as_mut() else {
        return;
    };

    clock.position = (clock.position + step).min(length);
    let position = clock.position;
    engine.on_video_time_update(current, position, length);
    if position >= length {
        *video = None;
        engine.on_video_ended(current);
    }
}

fn stall_limit(engine: &PlayerEngine, options: &SimulationOptions) -> Duration {
    let config = engine.config();
    let per_item = config.photo_duration().max(options.video_length) + config.transition_duration() * 2;
    let items = u32::try_from(engine.episode().media_count()).unwrap_or(u32::MAX);
    per_item.saturating_mul(items) + Duration::from_secs(u64::from(config.countdown_seconds)) + STALL_SLACK
}
