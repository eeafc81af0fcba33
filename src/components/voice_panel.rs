use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;
use crate::voice::VoiceSession;

/// Matches the original widget: only the last few utterances are shown.
const VISIBLE_LOG_LINES: usize = 5;

pub struct VoicePanel;

impl VoicePanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        session: &VoiceSession,
        transcript: Option<&str>,
    ) {
        let block = Block::default()
            .title(" Voice Assistant ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(if session.is_listening() {
                theme::current().accent
            } else {
                theme::current().border
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();

        let state_line = if session.is_listening() {
            Line::from(vec![
                Span::styled("\u{25cf} Listening", Style::default().fg(Color::Green)),
                Span::styled("   i:Speak  v:Stop", theme::current().dim),
            ])
        } else {
            Line::from(vec![
                Span::styled("\u{25cb} Idle", theme::current().dim),
                Span::styled("   v:Activate voice", theme::current().dim),
            ])
        };
        lines.push(state_line);

        if let Some(input) = transcript {
            lines.push(Line::from(vec![
                Span::styled("> ", theme::current().accent),
                Span::styled(format!("{}_", input), Style::default()),
            ]));
        }

        let log = session.log();
        if log.is_empty() {
            lines.push(Line::from(Span::styled(
                "No commands yet.",
                theme::current().dim,
            )));
        } else {
            for entry in log.recent(VISIBLE_LOG_LINES) {
                lines.push(Line::from(Span::styled(
                    entry.clone(),
                    theme::current().dim,
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
