use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::MonthCell;
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &[MonthCell],
        selected_date: NaiveDate,
        today: NaiveDate,
    ) {
        let year = selected_date.year();
        let month = selected_date.month();

        let title = format!(" {} {} ", month_name(month), year);
        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let col_w = (inner.width / 7).max(4);

        // Header row
        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| {
                Span::styled(
                    format!("{:^width$}", d, width = col_w as usize),
                    theme::current().header,
                )
            })
            .collect();

        let weeks: Vec<&[MonthCell]> = grid.chunks(7).collect();
        let rows_h = inner.height.saturating_sub(1);
        let week_h = (rows_h / weeks.len().max(1) as u16).max(1);

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(week_h)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(Line::from(header_cells)), rows[0]);

        for (w, week) in weeks.iter().enumerate() {
            let cols = Layout::horizontal([Constraint::Length(col_w); 7]).split(rows[w + 1]);
            for (c, cell) in week.iter().enumerate() {
                render_cell(frame, cols[c], cell, year, month, selected_date, today);
            }
        }
    }
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &MonthCell,
    year: i32,
    month: u32,
    selected_date: NaiveDate,
    today: NaiveDate,
) {
    let Some(day) = cell.day else {
        return;
    };
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid day");

    let day_style = if date == today && date == selected_date {
        theme::current().today.add_modifier(Modifier::BOLD)
    } else if date == selected_date {
        theme::current().selected
    } else if date == today {
        theme::current().today
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(Span::styled(format!("{:>2}", day), day_style))];

    // Task chips, as many as fit under the day number.
    let visible = area.height.saturating_sub(1) as usize;
    for task in cell.tasks.iter().take(visible) {
        let chip_style = match theme::parse_color(&task.color) {
            Some(color) => Style::default().bg(color).fg(ratatui::style::Color::Black),
            None => theme::current().highlight,
        };
        lines.push(Line::from(Span::styled(
            truncate(&task.title, area.width.saturating_sub(1) as usize),
            chip_style,
        )));
    }
    if cell.tasks.len() > visible {
        let hidden = cell.tasks.len() - visible;
        if let Some(last) = lines.last_mut() {
            *last = Line::from(Span::styled(format!("+{} more", hidden), theme::current().dim));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "\u{2026}"
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
