//! Confirmation dialog for deleting a submission

use super::base::{key_hints, render_dialog, DialogConfig};
use crate::state::PendingDeleteAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const MAX_NAME_LEN: usize = 40;

/// Render a confirmation dialog for a pending delete
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let name = if action.entity_display.is_empty() {
        "(no name)".to_string()
    } else {
        truncate_string(&action.entity_display, MAX_NAME_LEN)
    };
    let message = format!(
        "Delete Submission {} ({name})? This cannot be undone.",
        action.display_number
    );

    let mut footer: Vec<Line> = [(false, "Cancel", Color::White), (true, "Delete", Color::Red)]
        .into_iter()
        .map(|(is_delete, label, color)| {
            let is_selected = action.selected_option == is_delete;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();
    footer.push(Line::from(""));
    footer.push(key_hints(&[
        ("↑↓", "select"),
        ("Enter", "confirm"),
        ("Esc", "cancel"),
    ]));

    render_dialog(
        frame,
        DialogConfig {
            title: "Confirm Delete",
            title_color: Color::Red,
            border_color: Color::Red,
            message: &message,
            footer,
            max_width: 56,
        },
    );
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Ann", 10), "Ann");
        assert_eq!(truncate_string("Annabelle Smith", 8), "Annab...");
        assert_eq!(truncate_string("Zoë Zoë Zoë", 6), "Zoë...");
    }
}
