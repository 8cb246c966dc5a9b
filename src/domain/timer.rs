use super::cues::{decide, CueMemory, FiredCue, PhaseKey};
use super::enums::Stage;
use super::phases::{PHASE_TABLE, STAGE_TOTAL_SECS};
use super::settings::CueSettings;

/// The countdown state machine for one session.
///
/// Driven by an external 1 Hz tick source through `tick()`; `begin()` and
/// `reset()` are the only other entry points that mutate the stage. Commands
/// issued in a state where they don't apply are no-ops, not errors.
#[derive(Debug)]
pub struct TimerState {
    stage: Option<Stage>,
    sub_phase_index: usize,
    remaining_in_sub_phase: u32,
    remaining_in_stage: u32,
    running: bool,
    cue_memory: CueMemory,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            stage: None,
            sub_phase_index: 0,
            remaining_in_sub_phase: 0,
            remaining_in_stage: STAGE_TOTAL_SECS,
            running: false,
            cue_memory: CueMemory::default(),
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn sub_phase_index(&self) -> usize {
        self.sub_phase_index
    }

    pub fn remaining_in_sub_phase(&self) -> u32 {
        self.remaining_in_sub_phase
    }

    pub fn remaining_in_stage(&self) -> u32 {
        self.remaining_in_stage
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current stage's last sub-phase has been exhausted
    pub fn stage_complete(&self) -> bool {
        self.stage.is_some()
            && self.sub_phase_index == PHASE_TABLE.len() - 1
            && self.remaining_in_sub_phase == 0
    }

    /// Both nights are over; natural end of the session
    pub fn session_complete(&self) -> bool {
        self.stage == Some(Stage::Second) && self.stage_complete()
    }

    /// Start the first night, or the second once the first is exhausted.
    ///
    /// Any other call (mid-stage, session over) is a no-op. Returns whether
    /// the timer entered a running state, so the caller can couple the tick
    /// source's lifetime to it.
    pub fn begin(&mut self) -> bool {
        match self.stage {
            None => {
                self.enter_stage(Stage::First);
                true
            }
            Some(Stage::First) if self.stage_complete() => {
                self.enter_stage(Stage::Second);
                true
            }
            _ => false,
        }
    }

    fn enter_stage(&mut self, stage: Stage) {
        self.stage = Some(stage);
        self.sub_phase_index = 0;
        self.remaining_in_sub_phase = PHASE_TABLE[0].duration_secs;
        self.remaining_in_stage = STAGE_TOTAL_SECS;
        self.running = true;
        self.cue_memory.enter_phase((stage, 0));
    }

    /// Return unconditionally to the initial pre-start state
    pub fn reset(&mut self) {
        self.stage = None;
        self.sub_phase_index = 0;
        self.remaining_in_sub_phase = 0;
        self.remaining_in_stage = STAGE_TOTAL_SECS;
        self.running = false;
        self.cue_memory.clear();
    }

    /// Advance one second.
    ///
    /// Cue policy is evaluated against the pre-decrement remaining value,
    /// and only before the boundary branch: at `remaining <= 1` the tick
    /// rolls over to the next sub-phase (or completes the stage) without
    /// evaluating cues, so a cue bound to 0 seconds never fires. That edge
    /// case is deliberate and documented, not a bug.
    ///
    /// The settings record is passed in fresh each tick so mid-stage
    /// settings changes are observed immediately.
    pub fn tick(&mut self, settings: &CueSettings) -> Vec<FiredCue> {
        if !self.running {
            return Vec::new();
        }
        let Some(stage) = self.stage else {
            return Vec::new();
        };

        let mut fired = Vec::new();
        if self.remaining_in_sub_phase <= 1 {
            if self.sub_phase_index + 1 < PHASE_TABLE.len() {
                self.sub_phase_index += 1;
                self.remaining_in_sub_phase = PHASE_TABLE[self.sub_phase_index].duration_secs;
                self.cue_memory.enter_phase((stage, self.sub_phase_index));
            } else {
                self.remaining_in_sub_phase = 0;
                self.running = false;
            }
        } else {
            let key: PhaseKey = (stage, self.sub_phase_index);
            fired = decide(
                self.remaining_in_sub_phase,
                &PHASE_TABLE[self.sub_phase_index],
                settings,
                &mut self.cue_memory,
                key,
            );
            self.remaining_in_sub_phase -= 1;
        }

        self.remaining_in_stage = self.remaining_in_stage.saturating_sub(1);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cues::FiredCue;
    use crate::domain::enums::{CueKind, CueMode, StageKind};
    use crate::domain::settings::TimeCue;
    use pretty_assertions::assert_eq;

    fn silent_settings() -> CueSettings {
        CueSettings { enabled: false, ..CueSettings::default() }
    }

    fn tick_n(timer: &mut TimerState, settings: &CueSettings, n: u32) -> Vec<FiredCue> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(timer.tick(settings));
        }
        all
    }

    #[test]
    fn test_new_is_pre_start_state() {
        let timer = TimerState::new();
        assert_eq!(timer.stage(), None);
        assert_eq!(timer.sub_phase_index(), 0);
        assert_eq!(timer.remaining_in_sub_phase(), 0);
        assert_eq!(timer.remaining_in_stage(), STAGE_TOTAL_SECS);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_begin_starts_first_night() {
        let mut timer = TimerState::new();
        assert!(timer.begin());
        assert_eq!(timer.stage(), Some(Stage::First));
        assert_eq!(timer.sub_phase_index(), 0);
        assert_eq!(timer.remaining_in_sub_phase(), PHASE_TABLE[0].duration_secs);
        assert_eq!(timer.remaining_in_stage(), STAGE_TOTAL_SECS);
        assert!(timer.is_running());
    }

    #[test]
    fn test_begin_mid_stage_is_noop() {
        let mut timer = TimerState::new();
        timer.begin();
        tick_n(&mut timer, &silent_settings(), 10);

        let before_index = timer.sub_phase_index();
        let before_remaining = timer.remaining_in_sub_phase();
        assert!(!timer.begin());
        assert_eq!(timer.sub_phase_index(), before_index);
        assert_eq!(timer.remaining_in_sub_phase(), before_remaining);
    }

    #[test]
    fn test_each_sub_phase_advances_after_its_duration() {
        let settings = silent_settings();
        let mut timer = TimerState::new();
        timer.begin();

        for (idx, sub_phase) in PHASE_TABLE.iter().enumerate() {
            assert_eq!(timer.sub_phase_index(), idx);
            assert_eq!(timer.remaining_in_sub_phase(), sub_phase.duration_secs);
            tick_n(&mut timer, &settings, sub_phase.duration_secs);
            if idx + 1 < PHASE_TABLE.len() {
                assert_eq!(timer.sub_phase_index(), idx + 1);
                assert_eq!(
                    timer.remaining_in_sub_phase(),
                    PHASE_TABLE[idx + 1].duration_secs
                );
            }
        }

        assert!(timer.stage_complete());
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_in_sub_phase(), 0);
        assert_eq!(timer.remaining_in_stage(), 0);
    }

    #[test]
    fn test_ticks_past_completion_are_idempotent() {
        let settings = CueSettings::default();
        let mut timer = TimerState::new();
        timer.begin();
        tick_n(&mut timer, &settings, STAGE_TOTAL_SECS);
        assert!(timer.stage_complete());

        let fired = tick_n(&mut timer, &settings, 50);
        assert!(fired.is_empty());
        assert_eq!(timer.remaining_in_sub_phase(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_begin_after_first_night_starts_second() {
        let settings = silent_settings();
        let mut timer = TimerState::new();
        timer.begin();
        tick_n(&mut timer, &settings, STAGE_TOTAL_SECS);
        assert!(timer.stage_complete());

        assert!(timer.begin());
        assert_eq!(timer.stage(), Some(Stage::Second));
        assert_eq!(timer.sub_phase_index(), 0);
        assert_eq!(timer.remaining_in_sub_phase(), PHASE_TABLE[0].duration_secs);
        assert_eq!(timer.remaining_in_stage(), STAGE_TOTAL_SECS);
        assert!(timer.is_running());
    }

    #[test]
    fn test_begin_after_session_complete_is_noop() {
        let settings = silent_settings();
        let mut timer = TimerState::new();
        timer.begin();
        tick_n(&mut timer, &settings, STAGE_TOTAL_SECS);
        timer.begin();
        tick_n(&mut timer, &settings, STAGE_TOTAL_SECS);
        assert!(timer.session_complete());

        assert!(!timer.begin());
        assert_eq!(timer.stage(), Some(Stage::Second));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_reset_from_any_state_yields_canonical_none() {
        let settings = silent_settings();

        for warmup_ticks in [0u32, 1, 269, 270, 500, STAGE_TOTAL_SECS] {
            let mut timer = TimerState::new();
            timer.begin();
            tick_n(&mut timer, &settings, warmup_ticks);
            timer.reset();
            assert_eq!(timer.stage(), None);
            assert_eq!(timer.sub_phase_index(), 0);
            assert_eq!(timer.remaining_in_sub_phase(), 0);
            assert_eq!(timer.remaining_in_stage(), STAGE_TOTAL_SECS);
            assert!(!timer.is_running());
        }
    }

    #[test]
    fn test_tick_while_not_running_is_noop() {
        let mut timer = TimerState::new();
        let fired = timer.tick(&CueSettings::default());
        assert!(fired.is_empty());
        assert_eq!(timer.remaining_in_stage(), STAGE_TOTAL_SECS);
    }

    #[test]
    fn test_end_to_end_first_night_scenario() {
        // 270 ticks into the first night: sub-phase 1 active at its full
        // 180s, stage total down to 570.
        let settings = CueSettings {
            mode: CueMode::Custom,
            time_cues: vec![TimeCue { kind: CueKind::Seconds, value: 60 }],
            use_audio_files: crate::domain::settings::CueTypeFlags {
                noontide_start: false,
                night_start: false,
                time_remaining: false,
            },
            ..CueSettings::default()
        };
        let mut timer = TimerState::new();
        timer.begin();

        let fired = tick_n(&mut timer, &settings, 270);
        assert_eq!(timer.sub_phase_index(), 1);
        assert_eq!(timer.remaining_in_sub_phase(), 180);
        assert_eq!(timer.remaining_in_stage(), 570);

        // The 60-second cue fired exactly once, within sub-phase 0
        let time_cues: Vec<_> = fired
            .iter()
            .filter(|f| matches!(f, FiredCue::TimeRemaining(_)))
            .collect();
        assert_eq!(time_cues, vec![&FiredCue::TimeRemaining(60)]);
    }

    #[test]
    fn test_noontide_start_fires_once_despite_spurious_begin() {
        let settings = CueSettings::default();
        let mut timer = TimerState::new();
        timer.begin();

        let mut starts = 0;
        for i in 0..100 {
            if i == 40 {
                // Mistaken begin mid-phase: no-op, must not re-arm the cue
                timer.begin();
            }
            starts += timer
                .tick(&settings)
                .iter()
                .filter(|f| **f == FiredCue::PhaseStart(StageKind::Noontide))
                .count();
        }
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_seconds_cue_rearms_per_sub_phase() {
        // A 60s cue fires once in every sub-phase occurrence, 4 per night
        let settings = CueSettings {
            mode: CueMode::Custom,
            time_cues: vec![TimeCue { kind: CueKind::Seconds, value: 60 }],
            ..CueSettings::default()
        };
        let mut timer = TimerState::new();
        timer.begin();
        let fired = tick_n(&mut timer, &settings, STAGE_TOTAL_SECS);
        let count = fired
            .iter()
            .filter(|f| matches!(f, FiredCue::TimeRemaining(_)))
            .count();
        assert_eq!(count, PHASE_TABLE.len());
    }
}
