use crate::app::AppState;
use crate::domain::{format_clock, timer_view, ActionButton, StageKind};
use crate::ui::styles::{
    action_style, border_style, countdown_style, default_style, gauge_style, muted_style,
    night_style, noontide_style, stage_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the main timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let view = timer_view(&app.timer);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Nightfall ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Stage label
            Constraint::Length(3), // Total night timer
            Constraint::Length(3), // Sub-phase label + countdown
            Constraint::Length(1), // Phase progress gauge
            Constraint::Length(2), // Action prompt
            Constraint::Min(0),    // Footer
        ])
        .split(inner);

    let stage_line = Paragraph::new(Line::styled(view.stage_label.clone(), stage_style()))
        .alignment(Alignment::Center);
    f.render_widget(stage_line, chunks[0]);

    let total = Paragraph::new(vec![
        Line::styled("Total Night Timer", default_style()),
        Line::styled(format_clock(view.stage_secs), countdown_style()),
    ])
    .alignment(Alignment::Center);
    f.render_widget(total, chunks[1]);

    // Sub-phase heading and countdown, hidden once the session is over
    if !view.circle_label.is_empty() {
        let accent = if view.circle_label == StageKind::Noontide.name() {
            noontide_style()
        } else {
            night_style()
        };
        let sub_phase = Paragraph::new(vec![
            Line::styled(
                format!("{} - {}", view.circle_label, view.phase_label),
                accent,
            ),
            Line::styled(format_clock(view.phase_secs), countdown_style()),
        ])
        .alignment(Alignment::Center);
        f.render_widget(sub_phase, chunks[2]);

        let gauge = Gauge::default()
            .gauge_style(gauge_style())
            .ratio(view.phase_secs as f64 / view.phase_total_secs as f64)
            .label(format_clock(view.phase_secs));
        f.render_widget(gauge, centered_gauge_area(chunks[3]));
    }

    let prompt = match view.action {
        ActionButton::Begin => "[b] Begin",
        ActionButton::SecondNight => "[b] Second Night",
        ActionButton::Running => "Running...",
        ActionButton::NewSession => "Night survived. [r] New Session",
    };
    let action = Paragraph::new(Line::styled(prompt, action_style()))
        .alignment(Alignment::Center);
    f.render_widget(action, chunks[4]);

    // Footer: session start time and audio status
    let mut footer = Vec::new();
    if let Some(started) = app.session_started_at {
        footer.push(Line::styled(
            format!("Session started {}", started.format("%H:%M")),
            default_style(),
        ));
    }
    if !app.settings.enabled {
        footer.push(Line::styled("audio cues muted", muted_style()));
    }
    if !footer.is_empty() {
        let footer = Paragraph::new(footer).alignment(Alignment::Center);
        f.render_widget(footer, chunks[5]);
    }
}

/// Keep the gauge to the middle half of the row
fn centered_gauge_area(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(area);
    chunks[1]
}
