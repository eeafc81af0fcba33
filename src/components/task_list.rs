use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::Task;
use crate::theme;

pub struct TaskList;

impl TaskList {
    pub fn render(frame: &mut Frame, area: Rect, tasks: &[&Task], selected_index: usize) {
        let w = area.width as usize;

        let title = if w >= 26 {
            format!(" Upcoming Tasks ({}) ", tasks.len())
        } else {
            " Upcoming ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::HEADER_STYLE)
            .borders(Borders::ALL)
            .border_style(theme::BORDER_STYLE);

        if tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No tasks scheduled.").style(theme::DIM_STYLE);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let mut items: Vec<ListItem> = Vec::new();

        for (i, task) in tasks.iter().enumerate() {
            let is_selected = i == selected_index;
            let edge = Span::styled(
                "\u{258c}",
                match theme::parse_color(&task.color) {
                    Some(color) => Style::default().fg(color),
                    None => theme::current().accent,
                },
            );

            let title_style = if is_selected {
                theme::SELECTED_STYLE
            } else {
                Style::default()
            };

            items.push(ListItem::new(Line::from(vec![
                edge,
                Span::styled(truncate(&task.title, inner_w.saturating_sub(2)), title_style),
            ])));
            items.push(ListItem::new(Line::from(Span::styled(
                format!("  {}", task.display_date_full()),
                theme::DIM_STYLE,
            ))));
        }

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
