use reel_cli::{CliError, ReelConfig};
use std::fs;
use std::path::PathBuf;

#[test]
fn defaults_without_file() {
    let config = ReelConfig::default();

    assert_eq!(config.player.photo_duration_ms, 5000);
    assert_eq!(config.player.countdown_seconds, 10);
    assert_eq!(
        config.storage.settings_path,
        PathBuf::from("./data/settings.json")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn loads_sections_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reel.toml");
    fs::write(
        &path,
        r#"
[player]
photo_duration_ms = 3000
transition_duration_ms = 0
transition_styles = ["fade", "zoom"]
seed = 9
show_intro = true

[storage]
settings_path = "/tmp/reel-settings.json"
"#,
    )
    .unwrap();

    let config = ReelConfig::load(Some(&path)).unwrap();

    assert_eq!(config.player.photo_duration_ms, 3000);
    assert_eq!(config.player.transition_duration_ms, 0);
    assert_eq!(config.player.tick_interval_ms, 50);
    assert_eq!(config.player.transition_styles.len(), 2);
    assert_eq!(config.player.seed, Some(9));
    assert!(config.player.show_intro);
    assert_eq!(
        config.storage.settings_path,
        PathBuf::from("/tmp/reel-settings.json")
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReelConfig::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn validation_rejects_tick_longer_than_photo() {
    let mut config = ReelConfig::default();
    config.player.photo_duration_ms = 20;

    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}

#[test]
fn validation_rejects_empty_settings_path() {
    let mut config = ReelConfig::default();
    config.storage.settings_path = PathBuf::new();

    assert!(config.validate().is_err());
}
