use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginField {
    Username,
    Password,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone)]
pub struct LoginFormState {
    pub username: String,
    pub password: String,
    pub mode: AuthMode,
    pub active_field: LoginField,
    pub show_password: bool,
    /// One human-readable line; each new failure replaces the previous.
    pub error: Option<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            mode: AuthMode::Login,
            active_field: LoginField::Username,
            show_password: false,
            error: None,
        }
    }
}

impl LoginFormState {
    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }
}

pub struct LoginForm;

impl LoginForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &LoginFormState) {
        let form_w = area.width.min(48).max(32);
        let form_h = area.height.min(16).max(12);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = match state.mode {
            AuthMode::Login => " Login to JARVIS ",
            AuthMode::Register => " Register to JARVIS ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // banner
            Constraint::Length(1), // tagline
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error
            Constraint::Length(1), // username
            Constraint::Length(1), // password
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Length(1), // help 2
            Constraint::Min(0),
            Constraint::Length(1), // footer
        ])
        .split(inner);

        let banner = Line::from(Span::styled(
            format!("{:^width$}", "J A R V I S", width = inner.width as usize),
            theme::current().accent.add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(banner), rows[0]);

        let tagline = Line::from(Span::styled(
            format!(
                "{:^width$}",
                "Your personal AI calendar assistant",
                width = inner.width as usize
            ),
            theme::current().dim,
        ));
        frame.render_widget(Paragraph::new(tagline), rows[1]);

        if let Some(ref error) = state.error {
            let line = Line::from(Span::styled(format!(" {}", error), theme::ERROR_STYLE));
            frame.render_widget(Paragraph::new(line), rows[3]);
        }

        render_field(
            frame,
            rows[4],
            "Name:",
            &state.username,
            state.active_field == LoginField::Username,
        );

        let password_display = if state.show_password {
            state.password.clone()
        } else {
            "*".repeat(state.password.chars().count())
        };
        render_field(
            frame,
            rows[5],
            "Pass:",
            &password_display,
            state.active_field == LoginField::Password,
        );

        let switch_hint = match state.mode {
            AuthMode::Login => "Ctrl+R:Register instead",
            AuthMode::Register => "Ctrl+R:Login instead",
        };
        let help = Line::from(vec![
            Span::styled(" Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Submit ", theme::current().dim),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme::current().dim),
            Span::styled("Ctrl+P", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Show password", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
        let help2 = Line::from(vec![
            Span::styled(format!(" {}", switch_hint), theme::current().dim),
            Span::styled("  Ctrl+C:Quit", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help2), rows[8]);

        let footer = Line::from(Span::styled(
            format!(
                "{:^width$}",
                "Powered by AP Industries Technology",
                width = inner.width as usize
            ),
            theme::current().dim,
        ));
        frame.render_widget(Paragraph::new(footer), rows[10]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {:<6}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
