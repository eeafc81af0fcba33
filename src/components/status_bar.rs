use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{InputMode, Screen};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        screen: Screen,
        input_mode: InputMode,
        user: Option<&str>,
        status_message: Option<&str>,
    ) {
        let w = area.width as usize;

        let left = match (screen, user) {
            (Screen::Calendar, Some(user)) => format!(" Calendar \u{2014} {} ", user),
            (Screen::Settings, Some(user)) => format!(" Settings \u{2014} {} ", user),
            _ => " JARVIS ".to_string(),
        };

        // A status message overrides the hints until the next key press.
        let right = if let Some(msg) = status_message {
            format!(" {} ", msg)
        } else {
            match (screen, input_mode) {
                (Screen::Calendar, InputMode::Normal) if w >= 90 => {
                    " hjkl:Day [/]:Month t:Today n:Task D:DelTask J/K:Pick v:Voice s:Settings o:Logout q:Quit".to_string()
                }
                (Screen::Calendar, InputMode::Normal) => " n:Task v:Voice s:Settings q:Quit".to_string(),
                (Screen::Calendar, InputMode::TaskForm) => " Tab:Field Enter:Add Esc:Cancel".to_string(),
                (Screen::Calendar, InputMode::Transcript) => " Enter:Send utterance Esc:Cancel".to_string(),
                (Screen::Settings, _) => " Enter:Upload Ctrl+D:Delete account Esc:Back".to_string(),
                (Screen::Login, _) => " Enter:Submit Ctrl+R:Mode Ctrl+C:Quit".to_string(),
            }
        };

        // Char count, not byte length: the separator dash is multibyte.
        let used = left.chars().count() + right.chars().count();
        let padding = " ".repeat(w.saturating_sub(used));
        let line = Line::from(vec![
            Span::styled(left, theme::current().status),
            Span::styled(padding, theme::current().status),
            Span::styled(right, theme::current().status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme::current().status), area);
    }
}
