pub mod cues;
pub mod enums;
pub mod phases;
pub mod settings;
pub mod timer;
pub mod views;

pub use cues::{decide, CueMemory, FiredCue, PhaseKey};
pub use enums::{ActionButton, CueKind, CueMode, Stage, StageKind, UiMode, Voice};
pub use phases::{format_clock, format_for_speech, SubPhase, PHASE_TABLE, STAGE_TOTAL_SECS};
pub use settings::{CueSettings, CueTypeFlags, TimeCue};
pub use timer::TimerState;
pub use views::{timer_view, TimerView};
