pub mod keybindings;
pub mod layout;
pub mod settings_modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::Frame;
use settings_modal::render_settings_modal;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);

    if app.ui_mode == UiMode::Settings {
        render_settings_modal(f, app, size);
    }
}
