use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

// Const fallbacks used in places that need compile-time styles
pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BORDER_STYLE: Style = Style::new().fg(Color::Gray);
pub const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::LightBlue),
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "arc" => Self::arc(),
            "stark" => Self::stark(),
            _ => Self::default(),
        }
    }

    // Arc-reactor palette: deep slate, electric blue, gold for today.
    fn arc() -> Self {
        Self {
            name: "arc".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(245, 158, 11)), // gold
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(59, 130, 246)), // arc blue
            header: Style::default().fg(Color::Rgb(147, 197, 253)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(100, 116, 139)),
            border: Style::default().fg(Color::Rgb(51, 65, 85)),
            status: Style::default()
                .fg(Color::Rgb(226, 232, 240))
                .bg(Color::Rgb(30, 41, 59)),
            highlight: Style::default()
                .bg(Color::Rgb(30, 41, 59))
                .add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(59, 130, 246)),
        }
    }

    // Hot-rod red with gold trim.
    fn stark() -> Self {
        Self {
            name: "stark".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(245, 158, 11)),
            selected: Style::default().fg(Color::White).bg(Color::Rgb(220, 38, 38)),
            header: Style::default().fg(Color::Rgb(252, 211, 77)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(120, 113, 108)),
            border: Style::default().fg(Color::Rgb(87, 83, 78)),
            status: Style::default()
                .fg(Color::Rgb(250, 250, 249))
                .bg(Color::Rgb(68, 64, 60)),
            highlight: Style::default()
                .bg(Color::Rgb(68, 64, 60))
                .add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(220, 38, 38)),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jarvis-tui").join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    today_fg: Option<String>,
    today_bg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    highlight_bg: Option<String>,
    accent_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.highlight_bg.as_deref().and_then(parse_color) {
            theme.highlight = theme.highlight.bg(c);
        }
        if let Some(c) = self.accent_fg.as_deref().and_then(parse_color) {
            theme.accent = theme.accent.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors. Also used for
/// task color tags, which are hex by convention.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_and_named_colors() {
        assert_eq!(parse_color("#3B82F6"), Some(Color::Rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("#nothex"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn preset_overrides_apply() {
        let config: ThemeConfig =
            toml::from_str("preset = \"arc\"\ndim_fg = \"#112233\"").unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.name, "arc");
        assert_eq!(theme.dim.fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
    }
}
