use super::enums::{CueKind, CueMode, Stage, StageKind};
use super::phases::SubPhase;
use super::settings::CueSettings;
use std::collections::{HashMap, HashSet};

/// Identity of one phase occurrence, scoping cue de-duplication
pub type PhaseKey = (Stage, usize);

/// Identity of a cue within one phase occurrence, used only for dedup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKey {
    PhaseStart(StageKind),
    Fixed(u32),
    Threshold(CueKind, u32),
}

/// A cue that fired this tick, ready for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiredCue {
    PhaseStart(StageKind),
    /// Default-mode countdown cue, in whole minutes remaining
    FixedMinutes(u32),
    /// Custom-mode countdown cue, carrying the pre-decrement seconds to speak
    TimeRemaining(u32),
}

/// Fixed default-mode countdown thresholds: (seconds remaining, minutes spoken)
pub const FIXED_CUES: [(u32, u32); 3] = [(180, 3), (120, 2), (60, 1)];

/// At-most-once-per-phase memory of fired cues, keyed by phase occurrence.
///
/// The key's entry is replaced wholesale on every phase transition, so a cue
/// that fired in one sub-phase occurrence can fire again in the next.
#[derive(Debug, Default)]
pub struct CueMemory {
    fired: HashMap<PhaseKey, HashSet<CueKey>>,
}

impl CueMemory {
    /// Begin a fresh occurrence of `key`, forgetting anything fired under it
    pub fn enter_phase(&mut self, key: PhaseKey) {
        self.fired.insert(key, HashSet::new());
    }

    pub fn clear(&mut self) {
        self.fired.clear();
    }

    fn was_fired(&self, key: PhaseKey, cue: CueKey) -> bool {
        self.fired.get(&key).is_some_and(|set| set.contains(&cue))
    }

    fn mark_fired(&mut self, key: PhaseKey, cue: CueKey) {
        self.fired.entry(key).or_default().insert(cue);
    }
}

/// Decide which cues fire this tick.
///
/// Called once per tick with the pre-decrement remaining value; every rule
/// that matches and has not yet fired for this phase occurrence fires
/// together. Checks and marks the memory in one step so delivery stays
/// at-most-once per phase key.
pub fn decide(
    prev_remaining: u32,
    sub_phase: &SubPhase,
    settings: &CueSettings,
    memory: &mut CueMemory,
    phase_key: PhaseKey,
) -> Vec<FiredCue> {
    if !settings.enabled {
        return Vec::new();
    }

    let mut fired = Vec::new();

    match settings.mode {
        CueMode::Default => {
            if prev_remaining == sub_phase.duration_secs {
                let cue = CueKey::PhaseStart(sub_phase.kind);
                if !memory.was_fired(phase_key, cue) {
                    memory.mark_fired(phase_key, cue);
                    fired.push(FiredCue::PhaseStart(sub_phase.kind));
                }
            }
            for (secs, mins) in FIXED_CUES {
                if prev_remaining == secs {
                    let cue = CueKey::Fixed(secs);
                    if !memory.was_fired(phase_key, cue) {
                        memory.mark_fired(phase_key, cue);
                        fired.push(FiredCue::FixedMinutes(mins));
                    }
                }
            }
        }
        CueMode::Custom => {
            if prev_remaining == sub_phase.duration_secs {
                let wanted = match sub_phase.kind {
                    StageKind::Noontide => settings.use_audio_files.noontide_start,
                    StageKind::Night => settings.use_audio_files.night_start,
                };
                let cue = CueKey::PhaseStart(sub_phase.kind);
                if wanted && !memory.was_fired(phase_key, cue) {
                    memory.mark_fired(phase_key, cue);
                    fired.push(FiredCue::PhaseStart(sub_phase.kind));
                }
            }
            let remaining_percent =
                prev_remaining as f64 / sub_phase.duration_secs as f64 * 100.0;
            for time_cue in &settings.time_cues {
                // Level-triggered: fires on the first tick at or below the
                // threshold; the memory gate keeps it from re-firing after.
                let matches = match time_cue.kind {
                    CueKind::Percent => remaining_percent <= time_cue.value as f64,
                    CueKind::Seconds => prev_remaining <= time_cue.value,
                };
                let cue = CueKey::Threshold(time_cue.kind, time_cue.value);
                if matches && !memory.was_fired(phase_key, cue) {
                    memory.mark_fired(phase_key, cue);
                    fired.push(FiredCue::TimeRemaining(prev_remaining));
                }
            }
        }
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::phases::PHASE_TABLE;
    use crate::domain::settings::TimeCue;

    fn custom_settings(cues: Vec<TimeCue>) -> CueSettings {
        CueSettings {
            mode: CueMode::Custom,
            time_cues: cues,
            // Phase-start cues off so logs hold only threshold fires
            use_audio_files: crate::domain::settings::CueTypeFlags {
                noontide_start: false,
                night_start: false,
                time_remaining: false,
            },
            ..CueSettings::default()
        }
    }

    /// Run decide over a full sub-phase the way the timer does: once per
    /// tick with the pre-decrement value, stopping before the boundary tick.
    fn run_phase(settings: &CueSettings, sub_phase: &SubPhase) -> Vec<(u32, Vec<FiredCue>)> {
        let mut memory = CueMemory::default();
        let key = (Stage::First, 0);
        memory.enter_phase(key);
        let mut log = Vec::new();
        let mut remaining = sub_phase.duration_secs;
        while remaining > 1 {
            let fired = decide(remaining, sub_phase, settings, &mut memory, key);
            if !fired.is_empty() {
                log.push((remaining, fired));
            }
            remaining -= 1;
        }
        log
    }

    #[test]
    fn test_default_mode_fixed_cues() {
        let settings = CueSettings::default();
        let log = run_phase(&settings, &PHASE_TABLE[0]);

        assert_eq!(log.len(), 4);
        assert_eq!(log[0], (270, vec![FiredCue::PhaseStart(StageKind::Noontide)]));
        assert_eq!(log[1], (180, vec![FiredCue::FixedMinutes(3)]));
        assert_eq!(log[2], (120, vec![FiredCue::FixedMinutes(2)]));
        assert_eq!(log[3], (60, vec![FiredCue::FixedMinutes(1)]));
    }

    #[test]
    fn test_default_mode_ignores_custom_cues() {
        let settings = CueSettings {
            time_cues: vec![TimeCue { kind: CueKind::Seconds, value: 90 }],
            ..CueSettings::default()
        };
        let log = run_phase(&settings, &PHASE_TABLE[1]);
        assert!(log
            .iter()
            .all(|(_, fired)| !matches!(fired[0], FiredCue::TimeRemaining(_))));
    }

    #[test]
    fn test_seconds_cue_fires_exactly_once() {
        let settings = custom_settings(vec![TimeCue { kind: CueKind::Seconds, value: 60 }]);
        let log = run_phase(&settings, &PHASE_TABLE[0]);
        let hits: Vec<_> = log
            .iter()
            .filter(|(_, fired)| fired.contains(&FiredCue::TimeRemaining(60)))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 60);
        // No later tick re-fires it
        assert_eq!(
            log.iter()
                .flat_map(|(_, fired)| fired.iter())
                .filter(|f| matches!(f, FiredCue::TimeRemaining(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_seconds_cue_fires_on_skip_past_threshold() {
        // Fast-forward past the exact value: the level trigger still catches
        let settings = custom_settings(vec![TimeCue { kind: CueKind::Seconds, value: 60 }]);
        let mut memory = CueMemory::default();
        let key = (Stage::Second, 2);
        memory.enter_phase(key);

        let fired = decide(59, &PHASE_TABLE[2], &settings, &mut memory, key);
        assert_eq!(fired, vec![FiredCue::TimeRemaining(59)]);
        let fired = decide(58, &PHASE_TABLE[2], &settings, &mut memory, key);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_percent_cue_is_level_triggered_once() {
        let settings = custom_settings(vec![TimeCue { kind: CueKind::Percent, value: 50 }]);
        let log = run_phase(&settings, &PHASE_TABLE[1]); // 180s
        assert_eq!(log.len(), 1);
        // 90/180 = 50%, the first tick at or below the threshold
        assert_eq!(log[0].0, 90);
    }

    #[test]
    fn test_zero_second_cue_never_fires() {
        // decide is never evaluated at remaining <= 1 (the boundary branch
        // runs instead), so a 0-second cue is unobservable.
        let settings = custom_settings(vec![TimeCue { kind: CueKind::Seconds, value: 0 }]);
        let log = run_phase(&settings, &PHASE_TABLE[3]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_custom_phase_start_gated_by_flag() {
        let mut settings = custom_settings(Vec::new());
        settings.use_audio_files.noontide_start = false;
        assert!(run_phase(&settings, &PHASE_TABLE[0]).is_empty());

        settings.use_audio_files.noontide_start = true;
        let log = run_phase(&settings, &PHASE_TABLE[0]);
        assert_eq!(log, vec![(270, vec![FiredCue::PhaseStart(StageKind::Noontide)])]);
    }

    #[test]
    fn test_master_disable_silences_everything() {
        let settings = CueSettings { enabled: false, ..CueSettings::default() };
        assert!(run_phase(&settings, &PHASE_TABLE[0]).is_empty());
    }

    #[test]
    fn test_matching_cues_fire_together() {
        let settings = custom_settings(vec![
            TimeCue { kind: CueKind::Seconds, value: 90 },
            TimeCue { kind: CueKind::Percent, value: 50 },
        ]);
        // 90/180 matches both thresholds on the same tick
        let mut memory = CueMemory::default();
        let key = (Stage::First, 1);
        memory.enter_phase(key);
        let fired = decide(90, &PHASE_TABLE[1], &settings, &mut memory, key);
        assert_eq!(fired.len(), 2);
    }

    #[test]
    fn test_memory_rearmed_on_new_phase_occurrence() {
        let settings = custom_settings(vec![TimeCue { kind: CueKind::Seconds, value: 60 }]);
        let mut memory = CueMemory::default();

        let first = (Stage::First, 0);
        memory.enter_phase(first);
        assert!(!decide(60, &PHASE_TABLE[0], &settings, &mut memory, first).is_empty());
        assert!(decide(59, &PHASE_TABLE[0], &settings, &mut memory, first).is_empty());

        // Same sub-phase index in the second night is a distinct key
        let second = (Stage::Second, 0);
        memory.enter_phase(second);
        assert!(!decide(60, &PHASE_TABLE[0], &settings, &mut memory, second).is_empty());

        // Re-entering the first key clears its fired set
        memory.enter_phase(first);
        assert!(!decide(60, &PHASE_TABLE[0], &settings, &mut memory, first).is_empty());
    }
}
