use super::files::atomic_write;
use crate::domain::{CueMode, CueSettings, CueTypeFlags, Voice};
use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Low-level failures reading the persisted record. Consumed internally by
/// `load_settings`, which falls back to defaults instead of surfacing them.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn read_record(path: &Path) -> Result<Value, SettingsError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the cue settings record. Never errors: a missing or unparsable file
/// yields the default record, and legacy records are migrated in-memory.
/// Nothing is written back here; persistence happens only through
/// `save_settings`.
pub fn load_settings(path: &Path) -> CueSettings {
    match read_record(path) {
        Ok(record) => settings_from_record(record),
        Err(_) => CueSettings::default(),
    }
}

/// Interpret a raw JSON record, migrating legacy records that predate the
/// `mode` discriminator. Migration is a fixed point: an already-migrated
/// record passes through unchanged.
pub fn settings_from_record(record: Value) -> CueSettings {
    if record.get("mode").and_then(Value::as_str).is_some() {
        match serde_json::from_value::<CueSettings>(record) {
            Ok(mut settings) => {
                settings.volume = settings.volume.clamp(0.0, 1.0);
                settings
            }
            Err(_) => CueSettings::default(),
        }
    } else {
        migrate_legacy(record)
    }
}

/// Legacy records carried no mode and an optional partial structure. They
/// become custom-mode records: whatever fields existed are kept, the
/// per-cue-type flags are coerced to booleans (anything non-true is off).
fn migrate_legacy(record: Value) -> CueSettings {
    let defaults = CueSettings::default();
    let Some(obj) = record.as_object() else {
        return defaults;
    };

    let flags = obj.get("useAudioFiles");
    let flag = |name: &str| {
        flags
            .and_then(|f| f.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };

    CueSettings {
        mode: CueMode::Custom,
        voice: Voice::Ranni,
        enabled: obj
            .get("enabled")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.enabled),
        volume: obj
            .get("volume")
            .and_then(Value::as_f64)
            .map(|v| (v as f32).clamp(0.0, 1.0))
            .unwrap_or(defaults.volume),
        time_cues: obj
            .get("timeCues")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or(defaults.time_cues),
        use_audio_files: CueTypeFlags {
            noontide_start: flag("noontideStart"),
            night_start: flag("nightStart"),
            time_remaining: flag("timeRemaining"),
        },
    }
}

/// Replace the persisted record wholesale
pub fn save_settings(path: &Path, settings: &CueSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}
