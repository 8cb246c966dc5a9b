use super::enums::StageKind;

/// A fixed-duration segment within a night
#[derive(Debug, Clone, Copy)]
pub struct SubPhase {
    pub kind: StageKind,
    pub label: &'static str,
    pub duration_secs: u32,
}

/// The four sub-phases of every night, in order
pub const PHASE_TABLE: [SubPhase; 4] = [
    SubPhase { kind: StageKind::Noontide, label: "Free Farm", duration_secs: 270 },
    SubPhase { kind: StageKind::Night, label: "Circle Closing", duration_secs: 180 },
    SubPhase { kind: StageKind::Noontide, label: "Free Farm", duration_secs: 210 },
    SubPhase { kind: StageKind::Night, label: "Circle Closing", duration_secs: 180 },
];

/// Total night countdown, independent of sub-phase boundaries
pub const STAGE_TOTAL_SECS: u32 = 14 * 60;

/// Format seconds as m:ss for display
pub fn format_clock(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Format seconds as a speech-friendly phrase, e.g. "3 minutes 20 seconds"
pub fn format_for_speech(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    if mins > 0 && secs > 0 {
        format!(
            "{} minute{} {} second{}",
            mins,
            if mins > 1 { "s" } else { "" },
            secs,
            if secs > 1 { "s" } else { "" }
        )
    } else if mins > 0 {
        format!("{} minute{}", mins, if mins > 1 { "s" } else { "" })
    } else {
        format!("{} second{}", secs, if secs != 1 { "s" } else { "" })
    }
}
