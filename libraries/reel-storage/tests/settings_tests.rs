use reel_core::PlayerSettings;
use reel_storage::{settings, JsonFileSettingsStore, SettingsStore};
use serde_json::json;

#[test]
fn test_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.json");

    {
        let store = JsonFileSettingsStore::open(&path).unwrap();
        settings::save_player_settings(&store, &PlayerSettings::new(0.35, true)).unwrap();
    }

    // A fresh store over the same file sees the values
    let store = JsonFileSettingsStore::open(&path).unwrap();
    let loaded = settings::load_player_settings(&store);
    assert_eq!(loaded.volume, 0.35);
    assert!(loaded.muted);
}

#[test]
fn test_file_created_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("player.json");

    let store = JsonFileSettingsStore::open(&path).unwrap();
    assert!(!path.exists());

    store.set(settings::SETTING_MUTED, &json!(false)).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_unrelated_keys_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.json");
    std::fs::write(&path, r#"{"theme": "dark", "playerVolume": 0.8}"#).unwrap();

    let store = JsonFileSettingsStore::open(&path).unwrap();
    assert_eq!(settings::load_player_settings(&store).volume, 0.8);

    settings::save_player_settings(&store, &PlayerSettings::new(0.1, false)).unwrap();

    let reopened = JsonFileSettingsStore::open(&path).unwrap();
    assert_eq!(reopened.get("theme").unwrap(), Some(json!("dark")));
    assert_eq!(settings::load_player_settings(&reopened).volume, 0.1);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("player.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(JsonFileSettingsStore::open(&path).is_err());
}
