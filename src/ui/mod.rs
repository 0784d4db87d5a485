//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod submissions;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let show_submissions = !app.wizard.submissions().is_empty();
    let screen = layout::create_layout(frame.area(), show_submissions);

    layout::draw_header(frame, screen.header, app);
    forms::draw_wizard(frame, screen.wizard, app);
    if let Some(area) = screen.submissions {
        submissions::draw(frame, area, app);
    }

    layout::draw_status_bar(frame, screen.status, app);

    // Dialogs on top
    if let Some(pending) = &app.state.pending_delete {
        components::render_confirm_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error, app.state.queued_errors());
    }
}
