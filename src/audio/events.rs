use crate::domain::{format_for_speech, FiredCue, StageKind};

/// Voice-pack file stem for a cue (default mode). Custom-mode countdown
/// cues have no file convention and resolve to nothing.
pub fn cue_file_stem(cue: FiredCue) -> Option<&'static str> {
    match cue {
        FiredCue::PhaseStart(StageKind::Noontide) => Some("noontideStart"),
        FiredCue::PhaseStart(StageKind::Night) => Some("nightStart"),
        FiredCue::FixedMinutes(3) => Some("3min"),
        FiredCue::FixedMinutes(2) => Some("2min"),
        FiredCue::FixedMinutes(1) => Some("1min"),
        FiredCue::FixedMinutes(_) | FiredCue::TimeRemaining(_) => None,
    }
}

/// Spoken text for a cue (custom mode)
pub fn cue_text(cue: FiredCue) -> String {
    match cue {
        FiredCue::PhaseStart(StageKind::Noontide) => {
            "Noontide is here nightfarer, Free Farm Starts Now".to_string()
        }
        FiredCue::PhaseStart(StageKind::Night) => {
            "Night is here nightfarer, Circle Closing".to_string()
        }
        FiredCue::FixedMinutes(mins) => {
            format!("Only {} remaining nightfarer", format_for_speech(mins * 60))
        }
        FiredCue::TimeRemaining(secs) => {
            format!("Only {} remaining nightfarer", format_for_speech(secs))
        }
    }
}
