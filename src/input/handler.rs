use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('b') | KeyCode::Enter | KeyCode::Char(' ') => {
            app.begin();
            Ok(false)
        }
        KeyCode::Char('r') => {
            app.reset();
            Ok(false)
        }
        KeyCode::Char('s') => {
            app.open_settings();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Esc => Ok(true),
        _ => Ok(false),
    }
}

fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let Some(form) = app.settings_form.as_mut() else {
        app.ui_mode = UiMode::Normal;
        return Ok(false);
    };

    match key.code {
        KeyCode::Up => form.move_up(),
        KeyCode::Down => form.move_down(),
        KeyCode::Left => form.adjust(-1),
        KeyCode::Right => form.adjust(1),
        KeyCode::Enter | KeyCode::Char(' ') => form.activate(),
        KeyCode::Char('d') | KeyCode::Delete => form.remove_selected_cue(),
        // Closing commits the draft; it is persisted on the next save pass
        KeyCode::Esc | KeyCode::Char('q') => app.close_settings(),
        _ => {}
    }
    Ok(false)
}
