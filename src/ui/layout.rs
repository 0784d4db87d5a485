//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{NEXT_SHORTCUT, RESET_SHORTCUT};
use crate::state::{Focus, FormSlot};
use crate::wizard::Step;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the submissions panel when shown
const SUBMISSIONS_WIDTH: u16 = 44;

/// Areas of the main screen
pub struct ScreenLayout {
    pub header: Rect,
    pub wizard: Rect,
    pub submissions: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into header, wizard page, optional submissions panel,
/// and the status bar line at the bottom
pub fn create_layout(area: Rect, show_submissions: bool) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step indicator
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !show_submissions {
        return ScreenLayout {
            header: rows[0],
            wizard: rows[1],
            submissions: None,
            status: rows[2],
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SUBMISSIONS_WIDTH)])
        .split(rows[1]);

    ScreenLayout {
        header: rows[0],
        wizard: columns[0],
        submissions: Some(columns[1]),
        status: rows[2],
    }
}

/// Draw the step indicator: "1 Personal Info ─ 2 Contact Info ─ ..."
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.wizard.is_submitted() {
        let title = Paragraph::new(Span::styled(
            "Multi-Step Form",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(title, area);
        return;
    }

    let current = app.wizard.step();
    let mut spans = Vec::new();
    for (idx, step) in Step::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ─── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if *step == current {
            (
                step.index().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if step.index() < current.index() {
            ("✓".to_string(), Style::default().fg(Color::Green))
        } else {
            (step.index().to_string(), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("({marker}) {}", step.label()), style));
    }

    let indicator = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(indicator, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {}", get_view_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.storage_label.as_str(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for what currently has focus
fn get_view_hints(app: &App) -> String {
    if app.state.focus == Focus::Submissions {
        return "j/k:nav  d:delete  y:copy  Tab:form  q:quit".to_string();
    }
    if app.wizard.is_submitted() {
        return format!("Enter:submit another  {NEXT_SHORTCUT}  q:quit");
    }
    let extra = match app.state.form.active_slot() {
        FormSlot::Input(_) => "Tab:next field  Esc:buttons",
        FormSlot::CategoryGrid => "arrows:move  Space:toggle  q:quit",
        FormSlot::Buttons => "←/→:select  Enter:press  Tab:panel  q:quit",
    };
    format!("{extra}  {NEXT_SHORTCUT}  {RESET_SHORTCUT}")
}
