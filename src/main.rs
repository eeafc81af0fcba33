mod account;
mod app;
mod calendar;
mod components;
mod config;
mod event;
mod speech;
mod storage;
mod theme;
mod tui;
mod voice;

use std::time::Duration;

use app::{App, InputMode, Screen};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};

use account::AccountManager;
use speech::SpeechEngine;
use voice::VoiceSession;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cfg = config::load();
    let speaker = SpeechEngine::spawn(cfg.voice.synth_voice.clone());
    let (feed, input) = speech::transcript_pair(cfg.voice.input_enabled());
    let voice = VoiceSession::new(Box::new(input), speaker.clone());

    let store = storage::FileStore::open_default()?;
    let accounts = AccountManager::new(Box::new(store));
    let mut app = App::new(accounts, speaker, voice, feed);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

/// Logs go to a file: stderr would bleed through the alternate screen.
fn init_logging() {
    let Some(dir) = storage::data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("jarvis-tui.log")) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick();

        terminal.draw(|frame| {
            let area = frame.area();

            match app.screen {
                Screen::Login => {
                    components::LoginForm::render(frame, area, &app.login_form);
                }
                Screen::Calendar => render_calendar(frame, area, app),
                Screen::Settings => {
                    let layout =
                        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
                    components::SettingsView::render(
                        frame,
                        layout[0],
                        app.user.as_deref().unwrap_or(""),
                        app.has_profile_image(),
                        &app.settings,
                    );
                    components::StatusBar::render(
                        frame,
                        layout[1],
                        app.screen,
                        app.input_mode,
                        app.user.as_deref(),
                        app.status_message.as_deref(),
                    );
                }
            }
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            app.status_message = None;

            match app.screen {
                Screen::Login => handle_login_input(app, key),
                Screen::Calendar => match app.input_mode {
                    InputMode::Normal => handle_calendar_input(app, key),
                    InputMode::TaskForm => handle_task_form_input(app, key),
                    InputMode::Transcript => handle_transcript_input(app, key),
                },
                Screen::Settings => handle_settings_input(app, key),
            }
        }
    }

    Ok(())
}

fn render_calendar(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &App) {
    use chrono::Datelike;

    let voice_h = if area.height >= 24 { 9 } else { 7 };
    let layout = Layout::vertical([
        Constraint::Min(10),
        Constraint::Length(voice_h),
        Constraint::Length(1),
    ])
    .split(area);

    let sidebar_w = if area.width >= 100 { 32 } else { 26 };
    let content = if area.width >= 60 {
        Layout::horizontal([Constraint::Min(30), Constraint::Length(sidebar_w)]).split(layout[0])
    } else {
        Layout::horizontal([Constraint::Min(20)]).split(layout[0])
    };

    let grid = app
        .store
        .month_grid(app.selected_date.year(), app.selected_date.month());
    components::MonthView::render(frame, content[0], &grid, app.selected_date, app.today);

    if content.len() > 1 {
        let upcoming = app.store.upcoming();
        components::TaskList::render(frame, content[1], &upcoming, app.task_selection);
    }

    let transcript = if app.input_mode == InputMode::Transcript {
        Some(app.transcript_input.as_str())
    } else {
        None
    };
    components::VoicePanel::render(frame, layout[1], &app.voice, transcript);

    if let Some(ref form) = app.task_form {
        components::TaskForm::render(frame, area, form);
    }

    components::StatusBar::render(
        frame,
        layout[2],
        app.screen,
        app.input_mode,
        app.user.as_deref(),
        app.status_message.as_deref(),
    );
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.running = false,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => app.login_form.toggle_mode(),
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => app.login_form.toggle_show_password(),
        (KeyCode::Enter, _) => app.submit_login(),
        (KeyCode::Tab, _) | (KeyCode::Down, _) | (KeyCode::Up, _) | (KeyCode::BackTab, _) => {
            app.login_form.active_field = app.login_form.active_field.next();
        }
        (KeyCode::Backspace, _) => app.login_form.backspace(),
        (KeyCode::Char(c), _) => app.login_form.input_char(c),
        _ => {}
    }
}

fn handle_calendar_input(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) | (KeyCode::Enter, _) => app.open_task_form(),
        (KeyCode::Char('D'), _) => app.delete_selected_task(),
        (KeyCode::Char('J'), _) => app.next_task_selection(),
        (KeyCode::Char('K'), _) => app.prev_task_selection(),
        (KeyCode::Char('v'), _) => app.toggle_listening(),
        (KeyCode::Char('i'), _) => app.begin_transcript(),
        (KeyCode::Char('s'), _) => app.open_settings(),
        (KeyCode::Char('o'), _) => app.logout(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_week(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_week(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        _ => {}
    }
}

fn handle_task_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_task_form(),
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(ref mut form) = app.task_form {
                form.active_field = form.active_field.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.task_form {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.task_form {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_transcript_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_transcript(),
        KeyCode::Enter => app.submit_transcript(),
        KeyCode::Backspace => {
            app.transcript_input.pop();
        }
        KeyCode::Char(c) => app.transcript_input.push(c),
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.running = false,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.delete_account(),
        (KeyCode::Esc, _) => app.close_settings(),
        (KeyCode::Enter, _) => app.upload_profile_image(),
        (KeyCode::Backspace, _) => {
            app.settings.path_input.pop();
        }
        (KeyCode::Char(c), _) => app.settings.path_input.push(c),
        _ => {}
    }
}
