use reel_cli::{simulate, CliError, SimulationOptions};
use reel_core::{NavigationRequest, SeriesCatalog, SeriesId};
use reel_playback::{EngineConfig, PlaybackError};
use reel_storage::{MemorySettingsStore, SettingsStore};
use std::sync::Arc;
use std::time::Duration;

const CATALOG: &str = r#"[
    {
        "id": "trip",
        "title": "Road Trip",
        "episodes": [
            {
                "id": "day-1",
                "title": "Day One",
                "media": [
                    { "id": "p1", "type": "photo", "url": "/media/p1.jpg" },
                    { "id": "v1", "type": "video", "url": "/media/v1.mp4" }
                ],
                "music": { "url": "/media/theme.mp3", "name": "Theme" }
            },
            {
                "id": "day-2",
                "title": "Day Two",
                "media": [
                    { "id": "p2", "type": "photo", "url": "/media/p2.jpg" }
                ]
            },
            {
                "id": "day-3",
                "title": "Day Three",
                "media": []
            }
        ]
    },
    {
        "id": "short",
        "title": "Short Film",
        "episodes": [
            {
                "title": "Only Episode",
                "media": [
                    { "id": "p1", "type": "photo", "url": "/media/p1.jpg" }
                ]
            }
        ]
    }
]"#;

fn catalog() -> SeriesCatalog {
    SeriesCatalog::from_json(CATALOG).unwrap()
}

fn store() -> Arc<dyn SettingsStore> {
    Arc::new(MemorySettingsStore::new())
}

fn config() -> EngineConfig {
    EngineConfig {
        seed: Some(3),
        ..Default::default()
    }
}

fn trip() -> SeriesId {
    SeriesId::new("trip")
}

#[test]
fn single_episode_stops_at_next_episode_request() {
    let options = SimulationOptions {
        video_length: Duration::from_secs(4),
        ..Default::default()
    };

    let report = simulate::run(&catalog(), store(), &config(), &trip(), 0, &options).unwrap();

    assert_eq!(report.episodes.len(), 1);
    let episode = &report.episodes[0];
    assert_eq!(episode.episode_id, "day-1");
    assert_eq!(episode.items_shown, vec![0, 1]);
    assert!(episode.items_failed.is_empty());
    assert_eq!(
        report.final_route(),
        Some(&NavigationRequest::Episode {
            series_id: trip(),
            index: 1
        })
    );
    // 5s photo + 300ms exit + ~4s video + 10s countdown
    assert!(episode.elapsed >= Duration::from_secs(19));
    assert!(episode.elapsed <= Duration::from_secs(20));
}

#[test]
fn follows_auto_advance_into_the_editor() {
    let options = SimulationOptions {
        max_episodes: 5,
        ..Default::default()
    };

    let report = simulate::run(&catalog(), store(), &config(), &trip(), 0, &options).unwrap();

    let ids: Vec<&str> = report
        .episodes
        .iter()
        .map(|e| e.episode_id.as_str())
        .collect();
    assert_eq!(ids, vec!["day-1", "day-2", "day-3"]);
    assert_eq!(
        report.final_route(),
        Some(&NavigationRequest::EditSeries { series_id: trip() })
    );
}

#[test]
fn starts_mid_series() {
    let options = SimulationOptions {
        max_episodes: 5,
        ..Default::default()
    };

    let report = simulate::run(&catalog(), store(), &config(), &trip(), 1, &options).unwrap();

    assert_eq!(report.episodes.len(), 2);
    assert_eq!(
        report.episodes[0].route,
        NavigationRequest::Episode {
            series_id: trip(),
            index: 2
        }
    );
}

#[test]
fn last_episode_returns_to_overview() {
    let options = SimulationOptions {
        max_episodes: 5,
        ..Default::default()
    };
    let short = SeriesId::new("short");

    let report = simulate::run(&catalog(), store(), &config(), &short, 0, &options).unwrap();

    assert_eq!(report.episodes.len(), 1);
    assert_eq!(
        report.final_route(),
        Some(&NavigationRequest::SeriesOverview { series_id: short })
    );
}

#[test]
fn intro_is_skipped() {
    let config = EngineConfig {
        show_intro: true,
        ..config()
    };

    let report = simulate::run(
        &catalog(),
        store(),
        &config,
        &trip(),
        1,
        &SimulationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.episodes[0].items_shown, vec![0]);
}

#[test]
fn unknown_episode_fails_to_load() {
    let result = simulate::run(
        &catalog(),
        store(),
        &config(),
        &trip(),
        9,
        &SimulationOptions::default(),
    );

    assert!(matches!(
        result,
        Err(CliError::Playback(PlaybackError::Load(_)))
    ));
}
