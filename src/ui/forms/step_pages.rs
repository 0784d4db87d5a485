//! Wizard pages: one per step plus the success view

use super::field_renderer::{draw_field, draw_message, FIELD_HEIGHT};
use crate::app::{App, CATEGORY_COLUMNS};
use crate::schema::{Category, FieldName};
use crate::state::{Focus, FormField, FormSlot};
use crate::ui::components::{button_width, render_button, BUTTON_HEIGHT};
use crate::wizard::Step;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Heading of a step page
fn page_title(step: Step) -> &'static str {
    match step {
        Step::PersonalInfo => "Personal Information",
        Step::ContactInfo => "Contact Information",
        Step::Categories => "Select Categories",
        Step::Review => "Review Your Information",
    }
}

/// Draw the page for the current step with its action row
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = app.state.focus == Focus::Form;
    let title = if app.wizard.is_submitted() {
        "Thank You"
    } else {
        page_title(app.wizard.step())
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(if form_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
        .split(inner);

    if app.wizard.is_submitted() {
        draw_success(frame, chunks[0]);
    } else {
        match app.wizard.step() {
            Step::PersonalInfo | Step::ContactInfo => draw_text_step(frame, chunks[0], app),
            Step::Categories => draw_categories(frame, chunks[0], app),
            Step::Review => draw_review(frame, chunks[0], app),
        }
    }

    draw_action_row(frame, chunks[1], app);
}

fn draw_text_step(frame: &mut Frame, area: Rect, app: &App) {
    let fields = app.wizard.step().fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let active = if app.state.focus == Focus::Form {
        app.state.form.active_input()
    } else {
        None
    };

    for (idx, name) in fields.iter().enumerate() {
        let Some(field) = FormField::for_field(*name) else {
            continue;
        };
        let value = app.wizard.record().text(*name).unwrap_or_default();
        draw_field(
            frame,
            chunks[idx],
            &field,
            value,
            app.wizard.message(*name),
            active == Some(*name),
        );
    }
}

fn draw_categories(frame: &mut Frame, area: Rect, app: &App) {
    let grid_focused =
        app.state.focus == Focus::Form && app.state.form.active_slot() == FormSlot::CategoryGrid;
    let cursor = app.state.form.focused_category();
    let record = app.wizard.record();

    let mut lines = vec![
        Line::from(Span::styled(
            "Choose at least one category:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for row in Category::ALL.chunks(CATEGORY_COLUMNS) {
        let mut spans = Vec::new();
        for category in row {
            let mark = if record.has_category(*category) { "[x]" } else { "[ ]" };
            let style = if grid_focused && *category == cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if record.has_category(*category) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            spans.push(Span::styled(
                format!("  {mark} {:<16}", category.label()),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(lines), chunks[0]);
    draw_message(frame, chunks[1], app.wizard.message(FieldName::Categories));
}

fn draw_review(frame: &mut Frame, area: Rect, app: &App) {
    let record = app.wizard.record();
    let label_style = Style::default().fg(Color::Cyan);

    let mut lines = Vec::new();
    for field in FieldName::ALL {
        let value = match field {
            FieldName::Categories if record.categories.is_empty() => {
                "No categories selected".to_string()
            }
            FieldName::Categories => record
                .categories
                .iter()
                .map(Category::label)
                .collect::<Vec<_>>()
                .join(", "),
            _ => record.display_value(field),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::raw(value),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_success(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✓ Form Has Been Submitted",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Thank you for your submission. Your information has been saved."),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draw Reset / Previous / Next-or-Submit, or "Submit Another Response"
fn draw_action_row(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let row_focused = app.state.focus == Focus::Form && form.is_buttons_row_active();
    let buttons = form.buttons();

    let mut constraints: Vec<Constraint> = buttons
        .iter()
        .map(|b| Constraint::Length(button_width(b.label())))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints(constraints)
        .split(area);

    for (idx, button) in buttons.iter().enumerate() {
        render_button(
            frame,
            chunks[idx],
            button.label(),
            idx == form.selected_button,
            row_focused,
        );
    }
}
