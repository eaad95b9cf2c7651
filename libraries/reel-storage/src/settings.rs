//! Player settings management
//!
//! Volume and mute are stored under fixed keys, shared across all series and
//! episodes. Values are JSON; legacy string values (`"0.5"`, `"true"`) as
//! written by the browser player are accepted on read.

use reel_core::PlayerSettings;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::Result;
use crate::store::SettingsStore;

/// Volume setting (float in [0, 1])
pub const SETTING_VOLUME: &str = "playerVolume";

/// Mute setting (boolean)
pub const SETTING_MUTED: &str = "playerMuted";

/// Load volume and mute from the store
///
/// Missing, unreadable or malformed values fall back to the defaults
/// (full volume, unmuted); the problem is logged and never surfaced.
pub fn load_player_settings(store: &dyn SettingsStore) -> PlayerSettings {
    let defaults = PlayerSettings::default();

    let volume = read(store, SETTING_VOLUME)
        .and_then(|v| parse_volume(&v))
        .unwrap_or(defaults.volume);
    let muted = read(store, SETTING_MUTED)
        .and_then(|v| parse_muted(&v))
        .unwrap_or(defaults.muted);

    PlayerSettings::new(volume, muted)
}

/// Persist volume and mute
pub fn save_player_settings(store: &dyn SettingsStore, settings: &PlayerSettings) -> Result<()> {
    store.set(SETTING_VOLUME, &json!(settings.volume))?;
    store.set(SETTING_MUTED, &json!(settings.muted))?;
    Ok(())
}

fn read(store: &dyn SettingsStore, key: &str) -> Option<Value> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read setting {}: {}", key, e);
            None
        }
    }
}

fn parse_volume(value: &Value) -> Option<f32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Some(v as f32),
        _ => {
            warn!("Ignoring malformed {} value: {}", SETTING_VOLUME, value);
            None
        }
    }
}

fn parse_muted(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s == "true"),
        _ => {
            warn!("Ignoring malformed {} value: {}", SETTING_MUTED, value);
            None
        }
    }
}
