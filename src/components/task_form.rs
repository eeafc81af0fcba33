use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

/// Arc-reactor blue, same default the original picker started on.
pub const DEFAULT_TASK_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskField {
    Title,
    Color,
}

impl TaskField {
    pub fn next(&self) -> Self {
        match self {
            TaskField::Title => TaskField::Color,
            TaskField::Color => TaskField::Title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskFormState {
    /// Canonical date of the clicked day; fixed for the form's lifetime.
    pub date: String,
    pub title: String,
    pub color: String,
    pub active_field: TaskField,
}

impl TaskFormState {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            title: String::new(),
            color: DEFAULT_TASK_COLOR.to_string(),
            active_field: TaskField::Title,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            TaskField::Title => self.title.push(c),
            TaskField::Color => self.color.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            TaskField::Title => {
                self.title.pop();
            }
            TaskField::Color => {
                self.color.pop();
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && theme::parse_color(&self.color).is_some()
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &TaskFormState) {
        let form_w = area.width.min(46).max(30);
        let form_h = area.height.min(10).max(8);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(format!(" New Task \u{2013} {} ", state.date))
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // color
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "Title:",
            &state.title,
            state.active_field == TaskField::Title,
            None,
        );

        let swatch = theme::parse_color(&state.color);
        render_field(
            frame,
            rows[1],
            "Color:",
            &state.color,
            state.active_field == TaskField::Color,
            swatch,
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Add ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    swatch: Option<ratatui::style::Color>,
) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];
    if let Some(color) = swatch {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("  ", Style::default().bg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_title_and_parsable_color() {
        let mut form = TaskFormState::new("2024-06-05");
        assert!(!form.is_valid());

        form.title = "   ".to_string();
        assert!(!form.is_valid());

        form.title = "Suit Calibration".to_string();
        assert!(form.is_valid());

        form.color = "#zzzzzz".to_string();
        assert!(!form.is_valid());
    }

    #[test]
    fn editing_targets_active_field() {
        let mut form = TaskFormState::new("2024-06-05");
        form.input_char('a');
        form.active_field = form.active_field.next();
        form.backspace();
        assert_eq!(form.title, "a");
        assert_eq!(form.color, "#3B82F");
    }
}
