//! Playback engine - core orchestration
//!
//! Owns the one `PlaybackSession` of a mounted player and coordinates the
//! sequencer, progress, transitions, audio, end-of-episode and input
//! components around it. All timing runs on the engine's `Scheduler`; the
//! host moves the clock with `advance_clock` and forwards video element
//! signals (`on_video_time_update`, `on_video_ended`, `on_media_error`).

use reel_core::{Episode, MediaItem, MediaKind, NavigationRequest, PlayerSettings};
use reel_storage::SettingsStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    audio::AudioController,
    end_of_episode::{CountdownTick, EndOfEpisodeController},
    error::Result,
    events::PlayerEvent,
    input::{InputController, InputEvent, PlayerCommand},
    output::MediaOutput,
    progress::{video_fraction, ProgressTracker},
    sequencer::{Advance, MediaSequencer},
    session::{PlaybackSession, SessionPhase},
    timer::{Scheduler, TimerId, TimerKind},
    transition::{PhaseChange, TransitionCoordinator},
    types::{EngineConfig, EpisodeContext, TransitionState},
    view::{EndAction, EndScreen, PlayerView},
};

/// Playback engine for one episode
///
/// Dropping the engine tears the session down exactly like `stop`.
pub struct PlayerEngine {
    episode: Episode,
    context: EpisodeContext,
    config: EngineConfig,

    // Mutable session state
    session: PlaybackSession,
    scheduler: Scheduler,

    // Components
    sequencer: MediaSequencer,
    progress: ProgressTracker,
    transitions: TransitionCoordinator,
    audio: AudioController,
    end: EndOfEpisodeController,
    input: InputController,

    // Events waiting for the host
    pending_events: Vec<PlayerEvent>,
}

impl PlayerEngine {
    /// Create an engine for `episode`
    ///
    /// Reads volume and mute from `store`. Nothing plays until `start`.
    pub fn new(
        episode: Episode,
        context: EpisodeContext,
        config: EngineConfig,
        store: Arc<dyn SettingsStore>,
    ) -> Result<Self> {
        config.validate()?;

        let sequencer = MediaSequencer::new(episode.media.clone(), &config);
        let progress = ProgressTracker::new(episode.media_count());
        let transitions = TransitionCoordinator::new(&config);
        let audio = AudioController::new(store, episode.music.clone());
        let end = EndOfEpisodeController::new(context.clone(), config.countdown_seconds);
        let input = InputController::new(config.controls_idle_timeout());

        Ok(Self {
            session: PlaybackSession::new(config.countdown_seconds),
            scheduler: Scheduler::new(),
            episode,
            context,
            config,
            sequencer,
            progress,
            transitions,
            audio,
            end,
            input,
            pending_events: Vec::new(),
        })
    }

    /// Bind the background music element
    pub fn attach_music_output(&mut self, output: Box<dyn MediaOutput>) -> Result<()> {
        self.audio.attach_music(output)?;
        self.sync_audio();
        Ok(())
    }

    /// Bind the element that shows video items
    pub fn attach_video_output(&mut self, output: Box<dyn MediaOutput>) {
        self.audio.attach_video(output);
        self.sync_audio();
    }

    // ===== Lifecycle =====

    /// Start the session
    ///
    /// An episode without media goes to the no-media state and starts no
    /// timer or input binding. Otherwise bindings go live at once, and with
    /// `show_intro` playback waits for `dismiss_intro`.
    pub fn start(&mut self) {
        if self.session.phase != SessionPhase::Created {
            debug!(phase = ?self.session.phase, "Start ignored, session already started");
            return;
        }

        if self.sequencer.is_empty() {
            info!(episode = %self.episode.id, "Episode has no media");
            self.session.phase = SessionPhase::NoMedia;
            self.session.playing = false;
            self.emit(PlayerEvent::NoMedia);
            return;
        }

        self.input.attach();
        if self.config.show_intro {
            debug!(episode = %self.episode.id, "Showing intro");
            self.session.phase = SessionPhase::Intro;
            self.emit(PlayerEvent::IntroShown);
            return;
        }

        self.begin_playback();
    }

    /// Leave the intro and start playback
    pub fn dismiss_intro(&mut self) {
        if self.session.phase == SessionPhase::Intro {
            self.begin_playback();
        }
    }

    /// Tear the session down
    ///
    /// Cancels every timer, unregisters input and silences the outputs.
    /// Idempotent.
    pub fn stop(&mut self) {
        if self.session.phase == SessionPhase::Stopped {
            return;
        }
        self.teardown();
        info!(episode = %self.episode.id, "Playback session stopped");
        self.emit(PlayerEvent::Stopped);
    }

    /// Move the clock forward, firing every timer that falls due
    pub fn advance_clock(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some((id, kind)) = self.scheduler.pop_due(deadline) {
            self.on_timer(id, kind);
        }
        self.scheduler.advance_to(deadline);
    }

    // ===== Playback control =====

    /// Resume playback
    ///
    /// Ignored while ended or without media. Returns true if state changed.
    pub fn play(&mut self) -> bool {
        if !self.session.is_running() || self.session.playing {
            return false;
        }
        self.session.playing = true;
        self.resume_timing();
        self.sync_audio();
        debug!(index = self.session.media_index, "Playback resumed");
        self.emit(PlayerEvent::StateChanged { playing: true });
        true
    }

    /// Pause playback, keeping the current photo's elapsed time
    pub fn pause(&mut self) -> bool {
        if !self.session.is_running() || !self.session.playing {
            return false;
        }
        self.session.playing = false;
        self.sequencer.pause_timing(&mut self.scheduler);
        if self.current_kind() == Some(MediaKind::Video) {
            self.audio.pause_video();
        }
        self.sync_audio();
        debug!(index = self.session.media_index, "Playback paused");
        self.emit(PlayerEvent::StateChanged { playing: false });
        self.show_controls();
        true
    }

    /// Toggle between play and pause
    pub fn toggle_play_pause(&mut self) -> bool {
        if self.session.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// The current item completed
    ///
    /// Moves to the next item through a transition, or ends the episode on
    /// the last one. Ignored during the exit phase of a transition.
    pub fn advance(&mut self) {
        if !self.session.is_running() {
            debug!("Advance ignored, session not running");
            return;
        }
        match self.session.transition {
            TransitionState::Exiting { .. } => {
                debug!("Advance ignored during transition exit");
                return;
            }
            TransitionState::Entering { .. } => self.finish_transition_phase(),
            TransitionState::Idle => {}
        }

        match self.sequencer.next_step(&self.session) {
            Advance::To(index) => {
                self.start_transition(index);
            }
            Advance::Exhausted => self.enter_end(),
        }
    }

    /// Manual seek to `index`
    ///
    /// No-op for the current index, an index out of range, while a
    /// transition runs or after the episode ended. Returns true if a
    /// transition started.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.session.is_running() {
            debug!(index, "Seek ignored, session not running");
            return false;
        }
        let Some(target) = self.sequencer.seek_target(&self.session, index) else {
            debug!(index, current = self.session.media_index, "Seek ignored");
            return false;
        };
        if !self.session.transition.is_idle() {
            debug!(index, "Seek rejected, transition in progress");
            return false;
        }
        self.start_transition(target)
    }

    /// Previous item
    pub fn previous(&mut self) -> bool {
        match self.session.media_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Next item
    pub fn next(&mut self) -> bool {
        self.go_to(self.session.media_index + 1)
    }

    // ===== Video element signals =====

    /// Periodic position report from the video element playing item `index`
    ///
    /// Reports for an item that is no longer current are ignored.
    pub fn on_video_time_update(&mut self, index: usize, position: Duration, duration: Duration) {
        if !self.is_current_video(index) || self.session.transition.is_exiting() {
            return;
        }
        if let Some(fraction) = video_fraction(position, duration) {
            self.report_progress(fraction);
        }
    }

    /// The video element finished item `index`
    ///
    /// A late signal from a video that is no longer current is ignored.
    pub fn on_video_ended(&mut self, index: usize) {
        if self.is_current_video(index) {
            self.advance();
        } else {
            debug!(index, current = self.session.media_index, "Stale video end ignored");
        }
    }

    /// Item `index` failed to load or play; skip it
    ///
    /// Reports for an item that is no longer current are ignored.
    pub fn on_media_error(&mut self, index: usize) {
        if !self.session.is_running() || index != self.session.media_index {
            return;
        }
        let url = self
            .sequencer
            .item(index)
            .map(|item| item.url.as_str())
            .unwrap_or_default();
        warn!(index, url, "Media failed, skipping");
        self.emit(PlayerEvent::MediaFailed { index });
        self.advance();
    }

    // ===== Audio =====

    /// Flip the audio source between music and the video's own audio
    pub fn toggle_audio_source(&mut self) {
        if self.session.phase != SessionPhase::Active {
            return;
        }
        let kind = self.current_kind();
        let audible = self.audio.toggle_source(&mut self.session, kind);
        self.emit(PlayerEvent::AudioSourceChanged {
            source: self.session.audio_source,
            audible,
        });
    }

    /// Set the volume (clamped into [0, 1]); clears mute and persists
    ///
    /// The new volume applies even if persisting it fails.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let saved = self.audio.set_volume(&self.session, volume);
        self.emit_volume();
        saved.map(|_| ())
    }

    /// Set the mute state and persist it
    pub fn set_muted(&mut self, muted: bool) -> Result<()> {
        let saved = self.audio.set_muted(&self.session, muted);
        self.emit_volume();
        saved.map(|_| ())
    }

    /// Toggle mute and persist it
    pub fn toggle_mute(&mut self) -> Result<()> {
        let saved = self.audio.toggle_mute(&self.session);
        self.emit_volume();
        saved.map(|_| ())
    }

    // ===== End of episode and navigation =====

    /// Restart the episode from item 0 with the music rewound
    pub fn replay(&mut self) -> bool {
        if self.session.phase != SessionPhase::Active {
            return false;
        }
        self.end.cancel(&mut self.scheduler);
        self.transitions.cancel(&mut self.session, &mut self.scheduler);
        self.sequencer.stop(&mut self.scheduler);
        self.audio.restart_music();

        self.session.rewind(self.config.countdown_seconds);
        info!(episode = %self.episode.id, "Replaying episode");
        self.emit(PlayerEvent::Replayed);
        self.emit(PlayerEvent::StateChanged { playing: true });
        self.emit(PlayerEvent::ProgressChanged { progress: 0.0 });
        self.on_item_current(0);
        true
    }

    /// Go to the next episode, or the series overview after the last one
    ///
    /// Only available on the end screen.
    pub fn play_next_episode(&mut self) -> bool {
        if !self.session.ended {
            return false;
        }
        self.end.cancel(&mut self.scheduler);
        let request = self.end.next_target();
        self.request_navigation(request);
        true
    }

    /// Back to the series overview
    pub fn exit_to_overview(&mut self) {
        if self.session.phase == SessionPhase::Stopped {
            return;
        }
        self.request_navigation(NavigationRequest::SeriesOverview {
            series_id: self.context.series_id.clone(),
        });
    }

    /// Open the series editor (the action offered when there is no media)
    pub fn request_edit_series(&mut self) {
        if self.session.phase == SessionPhase::Stopped {
            return;
        }
        self.request_navigation(NavigationRequest::EditSeries {
            series_id: self.context.series_id.clone(),
        });
    }

    /// Toggle fullscreen presentation
    pub fn toggle_fullscreen(&mut self) {
        if self.session.phase == SessionPhase::Stopped {
            return;
        }
        self.session.fullscreen = !self.session.fullscreen;
        self.emit(PlayerEvent::FullscreenChanged {
            fullscreen: self.session.fullscreen,
        });
    }

    // ===== Input =====

    /// Deliver a keyboard or pointer event
    ///
    /// Ignored unless the session's input bindings are attached. Playback
    /// commands still do nothing until the intro is dismissed.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if let Some(command) = self.input.translate(key) {
                    self.execute(command);
                }
            }
            InputEvent::PointerMoved => {
                if self.input.pointer_moved(&mut self.session, &mut self.scheduler) {
                    self.emit(PlayerEvent::ControlsVisibilityChanged { visible: true });
                }
            }
        }
    }

    /// Run a player command
    pub fn execute(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::TogglePlayPause => {
                self.toggle_play_pause();
            }
            PlayerCommand::Previous => {
                self.previous();
            }
            PlayerCommand::Next => {
                self.next();
            }
            PlayerCommand::ToggleMute => {
                if let Err(e) = self.toggle_mute() {
                    warn!("Failed to persist mute state: {}", e);
                }
            }
            PlayerCommand::ToggleAudioSource => self.toggle_audio_source(),
            PlayerCommand::ToggleFullscreen => self.toggle_fullscreen(),
            PlayerCommand::ExitToOverview => self.exit_to_overview(),
        }
    }

    // ===== Queries =====

    /// Session state
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Episode being played
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// Position of the episode in its series
    pub fn context(&self) -> &EpisodeContext {
        &self.context
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current volume and mute
    pub fn settings(&self) -> PlayerSettings {
        self.audio.settings()
    }

    /// Visible item
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.sequencer.current(&self.session)
    }

    /// Virtual clock time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of live timers
    pub fn live_timer_count(&self) -> usize {
        self.scheduler.live_count()
    }

    /// Check if a timer of `kind` is live
    pub fn has_live_timer(&self, kind: TimerKind) -> bool {
        self.scheduler.has_live(kind)
    }

    /// Check if input bindings are registered
    pub fn input_attached(&self) -> bool {
        self.input.is_attached()
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PlayerView {
        let count = self.sequencer.len();
        let index = self.session.media_index;
        let current = self.current_item().cloned();
        let kind = current.as_ref().map(|item| item.kind);
        let running = self.session.is_running();
        let settings = self.audio.settings();

        let end_screen = self.session.ended.then(|| {
            if self.end.has_next_episode() {
                EndScreen {
                    action: EndAction::NextEpisode,
                    countdown: Some(self.session.countdown),
                }
            } else {
                EndScreen {
                    action: EndAction::BackToSeries,
                    countdown: None,
                }
            }
        });

        PlayerView {
            phase: self.session.phase,
            title: self.episode.title.clone(),
            description: self.episode.description.clone(),
            episode_label: self.context.label(),
            current,
            counter: if count == 0 {
                String::new()
            } else {
                format!("{} / {}", index + 1, count)
            },
            dots: PlayerView::dots(count, index),
            can_go_previous: running && index > 0,
            can_go_next: running && index + 1 < count,
            playing: self.session.playing,
            progress: self.session.progress,
            transition: self.session.transition,
            show_audio_toggle: self.audio.source_toggle_available(kind),
            music_label: self.audio.track().map(|t| t.display_name().to_string()),
            volume: settings.volume,
            muted: settings.muted,
            end_screen,
            controls_visible: self.session.controls_visible,
            fullscreen: self.session.fullscreen,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn begin_playback(&mut self) {
        self.session.rewind(self.config.countdown_seconds);
        info!(
            episode = %self.episode.id,
            items = self.sequencer.len(),
            series = %self.context.series_id,
            index = self.context.episode_index,
            "Playback session started"
        );
        self.emit(PlayerEvent::SessionStarted {
            episode_id: self.episode.id.clone(),
            media_count: self.sequencer.len(),
        });
        self.emit(PlayerEvent::StateChanged { playing: true });
        self.on_item_current(0);
    }

    fn teardown(&mut self) {
        self.sequencer.stop(&mut self.scheduler);
        self.transitions.cancel(&mut self.session, &mut self.scheduler);
        self.end.cancel(&mut self.scheduler);
        self.input.detach(&mut self.scheduler);
        self.scheduler.clear();
        self.audio.stop();
        self.session.playing = false;
        self.session.phase = SessionPhase::Stopped;
    }

    fn on_timer(&mut self, id: TimerId, kind: TimerKind) {
        match kind {
            TimerKind::PhotoTick => self.on_photo_tick(id),
            TimerKind::TransitionPhase => {
                if let Some(change) =
                    self.transitions.on_phase_elapsed(id, &mut self.session, &mut self.scheduler)
                {
                    self.apply_phase_change(change);
                }
            }
            TimerKind::Countdown => self.on_countdown_tick(id),
            TimerKind::ControlsIdle => {
                if self.input.on_idle_elapsed(id, &mut self.session) {
                    self.emit(PlayerEvent::ControlsVisibilityChanged { visible: false });
                }
            }
        }
    }

    fn on_photo_tick(&mut self, id: TimerId) {
        let Some(tick) = self.sequencer.on_tick(id, &mut self.scheduler) else {
            return;
        };
        self.report_progress(tick.fraction);
        if tick.complete {
            self.advance();
        }
    }

    fn on_countdown_tick(&mut self, id: TimerId) {
        match self.end.on_tick(id, &mut self.session, &mut self.scheduler) {
            Some(CountdownTick::Remaining(remaining)) => {
                self.emit(PlayerEvent::CountdownTick { remaining });
            }
            Some(CountdownTick::Expired) => {
                self.emit(PlayerEvent::CountdownTick { remaining: 0 });
                self.play_next_episode();
            }
            None => {}
        }
    }

    fn start_transition(&mut self, target: usize) -> bool {
        let from = self.session.media_index;
        let Some(style) = self
            .transitions
            .request(&mut self.session, &mut self.scheduler, target)
        else {
            return false;
        };
        self.sequencer.pause_timing(&mut self.scheduler);
        self.emit(PlayerEvent::TransitionStarted {
            style,
            from,
            to: target,
        });
        true
    }

    fn finish_transition_phase(&mut self) {
        if let Some(change) = self
            .transitions
            .finish_phase(&mut self.session, &mut self.scheduler)
        {
            self.apply_phase_change(change);
        }
    }

    fn apply_phase_change(&mut self, change: PhaseChange) {
        match change {
            PhaseChange::Entered {
                previous, index, ..
            } => {
                if let Some(kind) = self.sequencer.item(index).map(|item| item.kind) {
                    self.emit(PlayerEvent::ItemChanged {
                        index,
                        kind,
                        previous,
                    });
                }
                self.on_item_current(previous);
            }
            PhaseChange::Settled => {
                self.emit(PlayerEvent::TransitionFinished {
                    index: self.session.media_index,
                });
            }
        }
    }

    /// Runs whenever an item becomes the visible one
    fn on_item_current(&mut self, previous: usize) {
        self.sequencer.begin_item(&mut self.scheduler);

        let before = self.session.progress;
        self.progress.enter_item(&mut self.session, previous);
        if self.session.progress != before {
            self.emit(PlayerEvent::ProgressChanged {
                progress: self.session.progress,
            });
        }

        let index = self.session.media_index;
        debug!(index, "Item current");
        if let Some(item) = self.sequencer.item(index).filter(|item| item.is_video()) {
            let url = item.url.clone();
            if let Err(e) = self.audio.load_video(&url) {
                warn!(index, "Failed to load video {}: {}", url, e);
                self.sync_audio();
                self.on_media_error(index);
                return;
            }
        }

        self.resume_timing();
        self.sync_audio();
    }

    /// Restart whatever times the current item, if playing
    fn resume_timing(&mut self) {
        if !self.session.playing || self.session.transition.is_exiting() {
            return;
        }
        match self.current_kind() {
            Some(MediaKind::Photo) => {
                // Photo tick and countdown never run together
                self.end.cancel(&mut self.scheduler);
                self.sequencer.start_timing(&self.session, &mut self.scheduler);
            }
            Some(MediaKind::Video) => {
                if let Err(e) = self.audio.play_video() {
                    warn!(index = self.session.media_index, "Video refused to play: {}", e);
                }
            }
            None => {}
        }
    }

    fn enter_end(&mut self) {
        self.sequencer.stop(&mut self.scheduler);
        self.transitions.cancel(&mut self.session, &mut self.scheduler);
        self.progress.complete(&mut self.session);
        self.end.enter(&mut self.session, &mut self.scheduler);
        self.sync_audio();

        self.emit(PlayerEvent::ProgressChanged { progress: 100.0 });
        self.emit(PlayerEvent::StateChanged { playing: false });
        self.emit(PlayerEvent::Ended);
        self.show_controls();
    }

    fn report_progress(&mut self, fraction: f64) {
        if self.progress.report(&mut self.session, fraction) {
            self.emit(PlayerEvent::ProgressChanged {
                progress: self.session.progress,
            });
        }
    }

    fn request_navigation(&mut self, request: NavigationRequest) {
        info!(route = %request, "Navigation requested");
        self.emit(PlayerEvent::NavigationRequested(request));
    }

    fn show_controls(&mut self) {
        if !self.session.controls_visible {
            self.session.controls_visible = true;
            self.emit(PlayerEvent::ControlsVisibilityChanged { visible: true });
        }
    }

    fn sync_audio(&mut self) {
        let kind = self.current_kind();
        self.audio.sync(&self.session, kind);
    }

    fn is_current_video(&self, index: usize) -> bool {
        self.session.is_running()
            && index == self.session.media_index
            && self.current_kind() == Some(MediaKind::Video)
    }

    fn current_kind(&self) -> Option<MediaKind> {
        self.sequencer.current_kind(&self.session)
    }

    fn emit_volume(&mut self) {
        let settings = self.audio.settings();
        self.emit(PlayerEvent::VolumeChanged {
            volume: settings.volume,
            muted: settings.muted,
        });
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}

impl Drop for PlayerEngine {
    fn drop(&mut self) {
        if self.session.phase != SessionPhase::Stopped {
            self.teardown();
        }
    }
}
