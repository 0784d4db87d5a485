//! Error dialog component

use super::base::{key_hints, render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

/// Render the front error of the queue; `queued` counts the errors behind it
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, queued: usize) {
    let mut footer = vec![key_hints(&[("Enter", "dismiss"), ("Esc", "dismiss")])];
    if queued > 0 {
        footer.push(Line::from(Span::styled(
            format!("{queued} more"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            message: error_message,
            footer,
            max_width: 60,
        },
    );
}
