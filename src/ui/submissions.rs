//! Previous submissions panel

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::schema::FieldName;
use crate::state::Focus;
use crate::storage::Submission;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Card for one submission: "Submission N", then one line per field
fn submission_card(number: usize, submission: &Submission) -> ListItem<'static> {
    let mut title = vec![Span::styled(
        format!("Submission {number}"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = submission.submitted_at {
        title.push(Span::styled(
            format!("  {}", at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(title)];
    for field in FieldName::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", field.label()), Style::default().fg(Color::Cyan)),
            Span::raw(submission.record.display_value(field)),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let submissions = app.wizard.submissions();
    let focused = app.state.focus == Focus::Submissions;

    let items: Vec<ListItem> = submissions
        .iter()
        .enumerate()
        .map(|(idx, s)| submission_card(idx + 1, s))
        .collect();

    let block = Block::default()
        .title(format!(" Previous Submissions ({}) ", submissions.len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let highlight = if focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(if focused { "▸ " } else { "  " });

    render_scrollable_list(frame, area, list, app.state.selected_index);
}
