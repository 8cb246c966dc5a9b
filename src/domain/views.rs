use super::enums::ActionButton;
use super::phases::{PHASE_TABLE, STAGE_TOTAL_SECS};
use super::timer::TimerState;

/// A snapshot of everything the presentation layer needs to draw the timer
#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    /// Night name, "Ready to Begin" before start, empty once the session ends
    pub stage_label: String,
    /// Sub-phase kind ("Noontide"/"Night"), possibly empty
    pub circle_label: String,
    /// Sub-phase label ("Free Farm"/"Circle Closing"), possibly empty
    pub phase_label: String,
    /// Seconds shown on the sub-phase countdown
    pub phase_secs: u32,
    /// Full duration of the displayed sub-phase, for the progress gauge
    pub phase_total_secs: u32,
    /// Seconds shown on the total night countdown
    pub stage_secs: u32,
    pub action: ActionButton,
}

/// Derive the rendered state from the timer.
///
/// Before start, the first sub-phase's labels and full duration are shown so
/// the pre-start state reads as "about to run", not as blank. Once the
/// second night completes, all labels are suppressed: same empty countdown,
/// distinguishable end-of-session state.
pub fn timer_view(timer: &TimerState) -> TimerView {
    let action = if timer.session_complete() {
        ActionButton::NewSession
    } else if timer.stage_complete() {
        ActionButton::SecondNight
    } else if timer.stage().is_some() {
        ActionButton::Running
    } else {
        ActionButton::Begin
    };

    if timer.session_complete() {
        return TimerView {
            stage_label: String::new(),
            circle_label: String::new(),
            phase_label: String::new(),
            phase_secs: 0,
            phase_total_secs: 1,
            stage_secs: timer.remaining_in_stage(),
            action,
        };
    }

    match timer.stage() {
        None => TimerView {
            stage_label: "Ready to Begin".to_string(),
            circle_label: PHASE_TABLE[0].kind.name().to_string(),
            phase_label: PHASE_TABLE[0].label.to_string(),
            phase_secs: PHASE_TABLE[0].duration_secs,
            phase_total_secs: PHASE_TABLE[0].duration_secs,
            stage_secs: STAGE_TOTAL_SECS,
            action,
        },
        Some(stage) => {
            let sub_phase = &PHASE_TABLE[timer.sub_phase_index()];
            TimerView {
                stage_label: stage.name().to_string(),
                circle_label: sub_phase.kind.name().to_string(),
                phase_label: sub_phase.label.to_string(),
                phase_secs: timer.remaining_in_sub_phase(),
                phase_total_secs: sub_phase.duration_secs,
                stage_secs: timer.remaining_in_stage(),
                action,
            }
        }
    }
}
