use serde::{Deserialize, Serialize};

/// Which half of the cycle a sub-phase belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Noontide,
    Night,
}

impl StageKind {
    /// Display name shown next to the sub-phase label
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Noontide => "Noontide",
            StageKind::Night => "Night",
        }
    }
}

/// Top-level stage of the session. The pre-start/terminal-reset state is
/// modeled as `Option<Stage>::None` on the timer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    First,
    Second,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::First => "First Night",
            Stage::Second => "Second Night",
        }
    }
}

/// Audio cue mode: voice-pack files at fixed intervals, or TTS at
/// user-configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueMode {
    Default,
    Custom,
}

/// Voice pack used in default mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voice {
    Ranni,
    Miquella,
    Malenia,
}

impl Voice {
    /// Directory name of the voice pack under the sounds directory
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Ranni => "Ranni",
            Voice::Miquella => "Miquella",
            Voice::Malenia => "Malenia",
        }
    }

    /// Next voice in the cycle (for the settings form)
    pub fn next(&self) -> Voice {
        match self {
            Voice::Ranni => Voice::Miquella,
            Voice::Miquella => Voice::Malenia,
            Voice::Malenia => Voice::Ranni,
        }
    }
}

/// Threshold kind for a user-configured time cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    Percent,
    Seconds,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Settings,
}

/// Which action the primary button/hint should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    /// Nothing started yet
    Begin,
    /// First night complete, second can be started
    SecondNight,
    /// A stage is counting down
    Running,
    /// Second night complete, session over
    NewSession,
}
