//! Background music and video audio
//!
//! The music handle loops independently of the visible item. While a video
//! is current the user picks which source is audible; the video element is
//! kept muted whenever the music is the chosen source. One volume/mute pair
//! drives both elements and every change is written to the settings store.

use reel_core::{MediaKind, MusicTrack, PlayerSettings};
use reel_storage::{settings, SettingsStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    output::MediaOutput,
    session::PlaybackSession,
    types::AudioSource,
    volume::Volume,
};

/// Music handle, video element and the shared volume
pub struct AudioController {
    store: Arc<dyn SettingsStore>,
    volume: Volume,
    track: Option<MusicTrack>,
    music: Option<Box<dyn MediaOutput>>,
    video: Option<Box<dyn MediaOutput>>,

    /// Whether the music handle was last told to play
    music_playing: bool,

    /// Whether the visible item is a video
    video_current: bool,
}

impl AudioController {
    /// Create a controller, reading volume and mute from `store`
    pub fn new(store: Arc<dyn SettingsStore>, track: Option<MusicTrack>) -> Self {
        let volume = Volume::from(settings::load_player_settings(store.as_ref()));
        debug!(
            volume = volume.level(),
            muted = volume.is_muted(),
            "Player settings loaded"
        );
        Self {
            store,
            volume,
            track,
            music: None,
            video: None,
            music_playing: false,
            video_current: false,
        }
    }

    /// Bind the music handle and load the episode's track (looping)
    pub fn attach_music(&mut self, mut output: Box<dyn MediaOutput>) -> Result<()> {
        if let Some(track) = &self.track {
            output.load(&track.url, true)?;
        }
        output.set_volume(self.volume.level());
        output.set_muted(self.volume.is_muted());
        self.music = Some(output);
        self.music_playing = false;
        Ok(())
    }

    /// Bind the element that shows video items
    pub fn attach_video(&mut self, output: Box<dyn MediaOutput>) {
        self.video = Some(output);
    }

    /// Check if the episode has a music track
    pub fn has_music(&self) -> bool {
        self.track.is_some()
    }

    /// Episode's music track
    pub fn track(&self) -> Option<&MusicTrack> {
        self.track.as_ref()
    }

    /// Current volume and mute
    pub fn settings(&self) -> PlayerSettings {
        self.volume.settings()
    }

    /// Check if the music handle is playing
    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Source actually heard for an item of `kind`, if any
    pub fn audible_source(
        &self,
        session: &PlaybackSession,
        kind: Option<MediaKind>,
    ) -> Option<AudioSource> {
        if self.volume.is_muted() {
            return None;
        }
        match kind {
            Some(MediaKind::Video) if self.has_music() => Some(session.audio_source),
            Some(MediaKind::Video) => Some(AudioSource::Video),
            _ if self.has_music() => Some(AudioSource::Music),
            _ => None,
        }
    }

    /// Check if the audio source toggle has an audible effect
    pub fn source_toggle_available(&self, kind: Option<MediaKind>) -> bool {
        kind == Some(MediaKind::Video) && self.has_music()
    }

    /// Bring both elements in line with the session
    ///
    /// Music plays while the session plays, unless a video is current and
    /// the video's own audio is selected. Leaving a video item pauses the
    /// video element.
    pub fn sync(&mut self, session: &PlaybackSession, kind: Option<MediaKind>) {
        let video_current = kind == Some(MediaKind::Video);
        if self.video_current && !video_current {
            debug!("Video item left, pausing video element");
            self.pause_video();
        }
        self.video_current = video_current;

        let video_selected =
            kind == Some(MediaKind::Video) && session.audio_source == AudioSource::Video;
        let music_wanted = self.has_music() && session.playing && !video_selected;

        if let Some(music) = self.music.as_mut() {
            if music_wanted && !self.music_playing {
                match music.play() {
                    Ok(()) => self.music_playing = true,
                    Err(e) => warn!("Background music refused to play: {}", e),
                }
            } else if !music_wanted && self.music_playing {
                music.pause();
                self.music_playing = false;
            }
        }

        self.apply_levels(session);
    }

    /// Flip the audio source selection
    ///
    /// Always flips; returns whether the change is audible right now.
    pub fn toggle_source(
        &mut self,
        session: &mut PlaybackSession,
        kind: Option<MediaKind>,
    ) -> bool {
        session.audio_source = session.audio_source.toggled();
        self.sync(session, kind);
        let audible = self.source_toggle_available(kind);
        debug!(source = ?session.audio_source, audible, "Audio source toggled");
        audible
    }

    /// Set the volume, clearing mute
    pub fn set_volume(&mut self, session: &PlaybackSession, level: f32) -> Result<PlayerSettings> {
        self.volume.set_level(level);
        self.volume.unmute();
        self.apply_levels(session);
        self.persist()
    }

    /// Set the mute state
    pub fn set_muted(&mut self, session: &PlaybackSession, muted: bool) -> Result<PlayerSettings> {
        self.volume.set_muted(muted);
        self.apply_levels(session);
        self.persist()
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self, session: &PlaybackSession) -> Result<PlayerSettings> {
        let muted = !self.volume.is_muted();
        self.set_muted(session, muted)
    }

    /// Rewind the music to position 0 (replay)
    pub fn restart_music(&mut self) {
        if let Some(music) = self.music.as_mut() {
            if let Err(e) = music.rewind() {
                warn!("Failed to rewind background music: {}", e);
            }
        }
    }

    /// Load a video item into the video element
    pub fn load_video(&mut self, url: &str) -> Result<()> {
        if let Some(video) = self.video.as_mut() {
            video.load(url, false)?;
        }
        Ok(())
    }

    /// Start or resume the video element
    pub fn play_video(&mut self) -> Result<()> {
        if let Some(video) = self.video.as_mut() {
            video.play()?;
        }
        Ok(())
    }

    /// Pause the video element
    pub fn pause_video(&mut self) {
        if let Some(video) = self.video.as_mut() {
            video.pause();
        }
    }

    /// Silence everything (session teardown)
    pub fn stop(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.pause();
        }
        self.music_playing = false;
        self.pause_video();
    }

    fn apply_levels(&mut self, session: &PlaybackSession) {
        let level = self.volume.level();
        let muted = self.volume.is_muted();
        let video_muted = muted
            || !self.video_current
            || (self.has_music() && session.audio_source == AudioSource::Music);

        if let Some(music) = self.music.as_mut() {
            music.set_volume(level);
            music.set_muted(muted);
        }
        if let Some(video) = self.video.as_mut() {
            video.set_volume(level);
            video.set_muted(video_muted);
        }
    }

    fn persist(&self) -> Result<PlayerSettings> {
        let current = self.volume.settings();
        settings::save_player_settings(self.store.as_ref(), &current)?;
        info!(volume = current.volume, muted = current.muted, "Player settings saved");
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingOutput;
    use reel_storage::MemorySettingsStore;

    struct Rig {
        audio: AudioController,
        music: RecordingOutput,
        video: RecordingOutput,
        store: Arc<MemorySettingsStore>,
    }

    fn rig(with_music: bool) -> Rig {
        let store = Arc::new(MemorySettingsStore::new());
        let track = with_music.then(|| MusicTrack::new("/music.mp3"));
        let mut audio = AudioController::new(store.clone(), track);
        let music = RecordingOutput::default();
        let video = RecordingOutput::default();
        audio.attach_music(Box::new(music.clone())).unwrap();
        audio.attach_video(Box::new(video.clone()));
        Rig {
            audio,
            music,
            video,
            store,
        }
    }

    fn playing_session() -> PlaybackSession {
        let mut session = PlaybackSession::new(10);
        session.rewind(10);
        session
    }

    #[test]
    fn music_is_loaded_looping() {
        let rig = rig(true);
        assert_eq!(rig.music.calls()[0], "load /music.mp3 true");
    }

    #[test]
    fn music_follows_playing_state() {
        let mut rig = rig(true);
        let mut session = playing_session();

        rig.audio.sync(&session, Some(MediaKind::Photo));
        assert!(rig.audio.is_music_playing());

        session.playing = false;
        rig.audio.sync(&session, Some(MediaKind::Photo));
        assert!(!rig.audio.is_music_playing());
        assert_eq!(rig.music.last("pause").as_deref(), Some("pause"));
    }

    #[test]
    fn video_source_pauses_music_on_video_items() {
        let mut rig = rig(true);
        let mut session = playing_session();
        rig.audio.sync(&session, Some(MediaKind::Video));
        assert!(rig.audio.is_music_playing());
        assert_eq!(rig.video.last("muted").as_deref(), Some("muted true"));

        assert!(rig.audio.toggle_source(&mut session, Some(MediaKind::Video)));
        assert_eq!(session.audio_source, AudioSource::Video);
        assert!(!rig.audio.is_music_playing());
        assert_eq!(rig.video.last("muted").as_deref(), Some("muted false"));
    }

    #[test]
    fn toggle_on_photo_flips_state_only() {
        let mut rig = rig(true);
        let mut session = playing_session();
        rig.audio.sync(&session, Some(MediaKind::Photo));

        assert!(!rig.audio.toggle_source(&mut session, Some(MediaKind::Photo)));
        assert_eq!(session.audio_source, AudioSource::Video);
        assert!(rig.audio.is_music_playing());
    }

    #[test]
    fn video_audible_without_music() {
        let mut rig = rig(false);
        let session = playing_session();
        rig.audio.sync(&session, Some(MediaKind::Video));

        assert_eq!(rig.video.last("muted").as_deref(), Some("muted false"));
        assert_eq!(
            rig.audio.audible_source(&session, Some(MediaKind::Video)),
            Some(AudioSource::Video)
        );
        assert!(!rig.audio.is_music_playing());
    }

    #[test]
    fn leaving_video_pauses_and_mutes_element() {
        let mut rig = rig(false);
        let session = playing_session();
        rig.audio.sync(&session, Some(MediaKind::Video));
        rig.audio.play_video().unwrap();
        assert_eq!(rig.video.last("muted").as_deref(), Some("muted false"));

        rig.audio.sync(&session, Some(MediaKind::Photo));
        let calls = rig.video.calls();
        let last_transport = calls.iter().rev().find(|c| *c == "play" || *c == "pause");
        assert_eq!(last_transport.map(String::as_str), Some("pause"));
        assert_eq!(rig.video.last("muted").as_deref(), Some("muted true"));

        rig.audio.set_volume(&session, 0.7).unwrap();
        assert_eq!(rig.video.last("muted").as_deref(), Some("muted true"));
    }

    #[test]
    fn set_volume_unmutes_and_persists() {
        let mut rig = rig(true);
        let session = playing_session();
        rig.audio.set_muted(&session, true).unwrap();

        let saved = rig.audio.set_volume(&session, 0.4).unwrap();
        assert_eq!(saved, PlayerSettings::new(0.4, false));
        assert_eq!(rig.music.last("volume").as_deref(), Some("volume 0.40"));
        assert_eq!(rig.video.last("volume").as_deref(), Some("volume 0.40"));

        let loaded = settings::load_player_settings(rig.store.as_ref());
        assert_eq!(loaded, PlayerSettings::new(0.4, false));
    }

    #[test]
    fn mute_silences_everything() {
        let mut rig = rig(true);
        let session = playing_session();

        rig.audio.toggle_mute(&session).unwrap();
        assert_eq!(rig.music.last("muted").as_deref(), Some("muted true"));
        assert_eq!(rig.audio.audible_source(&session, Some(MediaKind::Photo)), None);
        assert!(settings::load_player_settings(rig.store.as_ref()).muted);
    }

    #[test]
    fn restart_rewinds_music() {
        let mut rig = rig(true);
        rig.audio.restart_music();
        assert_eq!(rig.music.last("rewind").as_deref(), Some("rewind"));
    }
}
