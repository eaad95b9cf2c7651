//! Session loading
//!
//! Fetches an episode and its series length from the data collaborator and
//! builds an engine. A failed fetch never produces a partial session: the
//! navigator is sent back to the series overview and the error returned.

use reel_core::{EpisodeSource, Navigator, SeriesId};
use reel_storage::SettingsStore;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    engine::PlayerEngine,
    error::Result,
    types::{EngineConfig, EpisodeContext},
};

/// Load episode `episode_index` of `series_id` into a new engine
///
/// The engine is returned un-started; call `PlayerEngine::start`.
pub fn open_episode(
    source: &dyn EpisodeSource,
    navigator: &mut dyn Navigator,
    store: Arc<dyn SettingsStore>,
    config: EngineConfig,
    series_id: &SeriesId,
    episode_index: usize,
) -> Result<PlayerEngine> {
    let loaded = source
        .get_episode(series_id, episode_index)
        .and_then(|episode| Ok((episode, source.get_total_episodes(series_id)?)));

    match loaded {
        Ok((episode, total_episodes)) => {
            info!(
                series = %series_id,
                episode = episode_index,
                total_episodes,
                items = episode.media_count(),
                "Episode loaded"
            );
            let context = EpisodeContext::new(series_id.clone(), episode_index, total_episodes);
            PlayerEngine::new(episode, context, config, store)
        }
        Err(e) => {
            warn!(series = %series_id, episode = episode_index, "Failed to load episode: {}", e);
            navigator.go_to_series_overview(series_id);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use reel_core::{Episode, MediaItem, NavigationRequest, Series, SeriesCatalog};
    use reel_storage::MemorySettingsStore;

    fn catalog() -> SeriesCatalog {
        SeriesCatalog::new(vec![Series::new(
            "trip",
            "Road Trip",
            vec![
                Episode::new("e1", "Day One")
                    .with_media(vec![MediaItem::photo("p1", "/p1.jpg")]),
                Episode::new("e2", "Day Two"),
            ],
        )])
    }

    #[test]
    fn opens_episode_with_context() {
        let mut routes: Vec<NavigationRequest> = Vec::new();
        let engine = open_episode(
            &catalog(),
            &mut routes,
            Arc::new(MemorySettingsStore::new()),
            EngineConfig::default(),
            &SeriesId::new("trip"),
            1,
        )
        .unwrap();

        assert_eq!(engine.episode().id, "e2");
        assert_eq!(engine.context().total_episodes, 2);
        assert!(!engine.context().has_next_episode());
        assert!(routes.is_empty());
    }

    #[test]
    fn missing_episode_routes_to_overview() {
        let mut routes: Vec<NavigationRequest> = Vec::new();
        let result = open_episode(
            &catalog(),
            &mut routes,
            Arc::new(MemorySettingsStore::new()),
            EngineConfig::default(),
            &SeriesId::new("trip"),
            7,
        );

        assert!(matches!(result, Err(PlaybackError::Load(_))));
        assert_eq!(
            routes,
            vec![NavigationRequest::SeriesOverview {
                series_id: SeriesId::new("trip")
            }]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut routes: Vec<NavigationRequest> = Vec::new();
        let result = open_episode(
            &catalog(),
            &mut routes,
            Arc::new(MemorySettingsStore::new()),
            EngineConfig {
                photo_duration_ms: 0,
                ..Default::default()
            },
            &SeriesId::new("trip"),
            0,
        );

        assert!(matches!(result, Err(PlaybackError::InvalidConfig(_))));
    }
}
