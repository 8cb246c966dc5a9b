use crate::audio::CueDispatcher;
use crate::domain::{CueKind, CueMode, CueSettings, TimeCue, TimerState, UiMode};
use crate::persistence::{save_settings, settings_file};
use crate::ticker::Ticker;
use anyhow::Result;
use chrono::{DateTime, Local};

/// One editable row of the settings form. Which rows exist depends on the
/// draft's mode, mirroring the settings surface: voice only in default
/// mode, time cues and per-cue-type flags only in custom mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Mode,
    Enabled,
    Volume,
    Voice,
    TimeCue(usize),
    AddCue,
    NoontideFlag,
    NightFlag,
}

/// Working copy of the settings while the modal is open. Committed on
/// close; the live record is untouched until then.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub draft: CueSettings,
    pub selected: usize,
}

impl SettingsForm {
    pub fn new(settings: CueSettings) -> Self {
        Self { draft: settings, selected: 0 }
    }

    pub fn rows(&self) -> Vec<SettingsRow> {
        let mut rows = vec![SettingsRow::Mode, SettingsRow::Enabled, SettingsRow::Volume];
        match self.draft.mode {
            CueMode::Default => rows.push(SettingsRow::Voice),
            CueMode::Custom => {
                for i in 0..self.draft.time_cues.len() {
                    rows.push(SettingsRow::TimeCue(i));
                }
                rows.push(SettingsRow::AddCue);
                rows.push(SettingsRow::NoontideFlag);
                rows.push(SettingsRow::NightFlag);
            }
        }
        rows
    }

    pub fn selected_row(&self) -> SettingsRow {
        let rows = self.rows();
        rows[self.selected.min(rows.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows().len() - 1);
    }

    /// Left/Right on the selected row: step values, cycle choices
    pub fn adjust(&mut self, delta: i32) {
        match self.selected_row() {
            SettingsRow::Mode => self.toggle_mode(),
            SettingsRow::Enabled => self.draft.enabled = !self.draft.enabled,
            SettingsRow::Volume => {
                self.draft.volume =
                    (self.draft.volume + delta as f32 * 0.05).clamp(0.0, 1.0);
            }
            SettingsRow::Voice => self.draft.voice = self.draft.voice.next(),
            SettingsRow::TimeCue(i) => {
                let cue = &mut self.draft.time_cues[i];
                let stepped = cue.value as i64 + delta as i64 * 5;
                cue.value = clamp_cue_value(cue.kind, stepped);
            }
            SettingsRow::AddCue => {}
            SettingsRow::NoontideFlag => {
                self.draft.use_audio_files.noontide_start =
                    !self.draft.use_audio_files.noontide_start;
            }
            SettingsRow::NightFlag => {
                self.draft.use_audio_files.night_start = !self.draft.use_audio_files.night_start;
            }
        }
    }

    /// Enter/Space on the selected row: toggles, kind switch, add
    pub fn activate(&mut self) {
        match self.selected_row() {
            SettingsRow::TimeCue(i) => {
                let cue = &mut self.draft.time_cues[i];
                cue.kind = match cue.kind {
                    CueKind::Percent => CueKind::Seconds,
                    CueKind::Seconds => CueKind::Percent,
                };
                cue.value = clamp_cue_value(cue.kind, cue.value as i64);
            }
            SettingsRow::AddCue => {
                self.draft
                    .time_cues
                    .push(TimeCue { kind: CueKind::Seconds, value: 30 });
            }
            _ => self.adjust(1),
        }
    }

    /// Remove the selected time cue, if one is selected
    pub fn remove_selected_cue(&mut self) {
        if let SettingsRow::TimeCue(i) = self.selected_row() {
            self.draft.time_cues.remove(i);
            self.clamp_selection();
        }
    }

    fn toggle_mode(&mut self) {
        self.draft.mode = match self.draft.mode {
            CueMode::Default => CueMode::Custom,
            CueMode::Custom => CueMode::Default,
        };
        self.clamp_selection();
    }
}

fn clamp_cue_value(kind: CueKind, value: i64) -> u32 {
    let (min, max) = match kind {
        CueKind::Percent => (1, 99),
        CueKind::Seconds => (1, 600),
    };
    value.clamp(min, max) as u32
}

/// Main application state
pub struct AppState {
    pub timer: TimerState,
    pub settings: CueSettings,
    pub ticker: Ticker,
    pub dispatcher: CueDispatcher,
    pub ui_mode: UiMode,
    pub settings_form: Option<SettingsForm>,
    pub session_started_at: Option<DateTime<Local>>,
    pub needs_save: bool,
}

impl AppState {
    pub fn new(settings: CueSettings, dispatcher: CueDispatcher) -> Self {
        Self {
            timer: TimerState::new(),
            settings,
            ticker: Ticker::new(),
            dispatcher,
            ui_mode: UiMode::Normal,
            settings_form: None,
            session_started_at: None,
            needs_save: false,
        }
    }

    /// Start the first night, or the second after the first completes.
    /// The tick source is acquired only when the timer actually starts;
    /// repeated begins never stack a second one.
    pub fn begin(&mut self) {
        if self.timer.begin() {
            self.ticker.start();
            if self.session_started_at.is_none() {
                self.session_started_at = Some(Local::now());
            }
        }
    }

    /// Return to the pre-start state and release the tick source
    pub fn reset(&mut self) {
        self.timer.reset();
        self.ticker.stop();
        self.session_started_at = None;
    }

    /// Advance one second: evaluate cues, dispatch them, and release the
    /// tick source if the stage just completed
    pub fn tick(&mut self) {
        let fired = self.timer.tick(&self.settings);
        for cue in fired {
            self.dispatcher.dispatch(cue, &self.settings);
        }
        if !self.timer.is_running() {
            self.ticker.stop();
        }
    }

    /// Replace the live settings record; persisted on the next save pass
    pub fn update_settings(&mut self, settings: CueSettings) {
        self.settings = settings;
        self.needs_save = true;
    }

    /// Persist the settings record if it changed
    pub fn save_settings(&mut self) -> Result<()> {
        if self.needs_save {
            save_settings(&settings_file()?, &self.settings)?;
            self.needs_save = false;
        }
        Ok(())
    }

    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsForm::new(self.settings.clone()));
        self.ui_mode = UiMode::Settings;
    }

    /// Close the settings form, committing the draft
    pub fn close_settings(&mut self) {
        if let Some(form) = self.settings_form.take() {
            self.update_settings(form.draft);
        }
        self.ui_mode = UiMode::Normal;
    }
}
