use super::enums::{CueKind, CueMode, Voice};
use serde::{Deserialize, Serialize};

/// A user-configured time-remaining cue (custom mode)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCue {
    #[serde(rename = "type")]
    pub kind: CueKind,
    pub value: u32,
}

/// Per-cue-type toggles (custom mode)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CueTypeFlags {
    pub noontide_start: bool,
    pub night_start: bool,
    pub time_remaining: bool,
}

impl Default for CueTypeFlags {
    fn default() -> Self {
        Self {
            noontide_start: true,
            night_start: true,
            time_remaining: false,
        }
    }
}

/// The persisted audio-cue configuration record.
///
/// Field names stay camelCase on disk for compatibility with records written
/// by earlier releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueSettings {
    pub mode: CueMode,
    /// Voice pack; only used in default mode
    pub voice: Voice,
    pub enabled: bool,
    /// Playback volume in [0, 1]
    pub volume: f32,
    pub time_cues: Vec<TimeCue>,
    pub use_audio_files: CueTypeFlags,
}

impl Default for CueSettings {
    fn default() -> Self {
        Self {
            mode: CueMode::Default,
            voice: Voice::Ranni,
            enabled: true,
            volume: 1.0,
            time_cues: vec![
                TimeCue { kind: CueKind::Percent, value: 50 },
                TimeCue { kind: CueKind::Seconds, value: 60 },
            ],
            use_audio_files: CueTypeFlags::default(),
        }
    }
}
