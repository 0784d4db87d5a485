//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width of a button for its label, borders and padding included
pub fn button_width(content: &str) -> u16 {
    content.chars().count() as u16 + 4
}

/// Render a bordered button. `is_focused` tells whether the row holding
/// the button has keyboard focus; a selected button on an unfocused row
/// is drawn without the highlight.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_focused: bool,
) {
    let highlighted = is_selected && is_focused;
    let border_style = if highlighted {
        Style::default().fg(Color::Cyan)
    } else if is_selected {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
