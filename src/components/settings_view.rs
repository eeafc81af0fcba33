use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    /// Path to an image file to become the profile picture.
    pub path_input: String,
    pub message: Option<String>,
}

pub struct SettingsView;

impl SettingsView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        username: &str,
        has_profile_image: bool,
        state: &SettingsState,
    ) {
        let panel_w = area.width.min(52).max(34);
        let panel_h = area.height.min(12).max(9);
        let x = area.x + (area.width.saturating_sub(panel_w)) / 2;
        let y = area.y + (area.height.saturating_sub(panel_h)) / 2;
        let panel_area = Rect::new(x, y, panel_w, panel_h);

        frame.render_widget(Clear, panel_area);

        let block = Block::default()
            .title(" Settings ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // avatar
            Constraint::Length(1), // spacer
            Constraint::Length(1), // path input
            Constraint::Length(1), // message
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let initial = username
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        let avatar = if has_profile_image {
            Line::from(vec![
                Span::styled(format!(" ({}) ", initial), theme::current().selected),
                Span::styled(
                    format!(" {} \u{2014} profile picture on file", username),
                    Style::default(),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(format!(" ({}) ", initial), theme::current().highlight),
                Span::styled(
                    format!(" {} \u{2014} no profile picture", username),
                    theme::current().dim,
                ),
            ])
        };
        frame.render_widget(Paragraph::new(avatar), rows[0]);

        let input = Line::from(vec![
            Span::styled(" Image path: ", theme::current().dim),
            Span::styled(format!("{}_", state.path_input), theme::current().accent),
        ]);
        frame.render_widget(Paragraph::new(input), rows[2]);

        if let Some(ref message) = state.message {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {}", message),
                    theme::current().accent,
                ))),
                rows[3],
            );
        }

        let help = Line::from(vec![
            Span::styled(" Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Upload ", theme::current().dim),
            Span::styled("Ctrl+D", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Delete account ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Back", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}
