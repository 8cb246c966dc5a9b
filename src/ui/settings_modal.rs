use crate::app::{AppState, SettingsForm, SettingsRow};
use crate::domain::{CueKind, CueMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{default_style, hint_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the settings modal over the timer pane
pub fn render_settings_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.settings_form else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (i, row) in form.rows().into_iter().enumerate() {
        let style = if i == form.selected.min(form.rows().len() - 1) {
            selected_style()
        } else {
            default_style()
        };
        lines.push(Line::styled(format!("  {}", row_text(form, row)), style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  ↑/↓ select   ←/→ adjust   Enter toggle   d remove cue   Esc close",
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Audio Cue Settings ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn row_text(form: &SettingsForm, row: SettingsRow) -> String {
    let draft = &form.draft;
    match row {
        SettingsRow::Mode => format!(
            "Mode: {}",
            match draft.mode {
                CueMode::Default => "Default (game voices, fixed cues)",
                CueMode::Custom => "Custom (TTS, user cues)",
            }
        ),
        SettingsRow::Enabled => format!(
            "Audio cues: {}",
            if draft.enabled { "enabled" } else { "disabled" }
        ),
        SettingsRow::Volume => format!("Volume: {:.0}%", draft.volume * 100.0),
        SettingsRow::Voice => format!("Voice: {}", draft.voice.name()),
        SettingsRow::TimeCue(i) => {
            let cue = &draft.time_cues[i];
            match cue.kind {
                CueKind::Percent => format!("Cue at {}% remaining", cue.value),
                CueKind::Seconds => format!("Cue at {}s remaining", cue.value),
            }
        }
        SettingsRow::AddCue => "Add time cue".to_string(),
        SettingsRow::NoontideFlag => format!(
            "Noontide start cue: {}",
            if draft.use_audio_files.noontide_start { "on" } else { "off" }
        ),
        SettingsRow::NightFlag => format!(
            "Night start cue: {}",
            if draft.use_audio_files.night_start { "on" } else { "off" }
        ),
    }
}
