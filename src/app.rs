use chrono::{Datelike, Local, NaiveDate, Timelike};

use crate::account::AccountManager;
use crate::calendar::{days_in_month, TaskStore};
use crate::components::{AuthMode, LoginFormState, SettingsState, TaskFormState};
use crate::speech::{SpeechHandle, TranscriptFeed};
use crate::voice::VoiceSession;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Calendar,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    TaskForm,
    Transcript,
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub user: Option<String>,
    pub accounts: AccountManager,
    pub store: TaskStore,
    pub voice: VoiceSession,
    pub transcript_feed: TranscriptFeed,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub login_form: LoginFormState,
    pub task_form: Option<TaskFormState>,
    pub settings: SettingsState,
    pub transcript_input: String,
    pub task_selection: usize,
    pub status_message: Option<String>,
    speaker: SpeechHandle,
    greeted: bool,
}

impl App {
    pub fn new(
        accounts: AccountManager,
        speaker: SpeechHandle,
        voice: VoiceSession,
        transcript_feed: TranscriptFeed,
    ) -> Self {
        let today = Local::now().date_naive();
        let user = accounts.current_user();

        let mut app = Self {
            running: true,
            screen: Screen::Login,
            input_mode: InputMode::Normal,
            user: None,
            accounts,
            store: TaskStore::new(speaker.clone()),
            voice,
            transcript_feed,
            selected_date: today,
            today,
            login_form: LoginFormState::default(),
            task_form: None,
            settings: SettingsState::default(),
            transcript_input: String::new(),
            task_selection: 0,
            status_message: None,
            speaker,
            greeted: false,
        };

        // Saved session: skip the login form.
        if let Some(username) = user {
            app.enter_calendar(username);
        }

        app
    }

    /// Drains asynchronous collaborators; called once per UI tick.
    pub fn tick(&mut self) {
        self.voice.pump();
    }

    // ── session ──

    pub fn submit_login(&mut self) {
        let name = self.login_form.username.clone();
        let password = self.login_form.password.clone();
        let result = match self.login_form.mode {
            AuthMode::Login => self.accounts.login(&name, &password),
            AuthMode::Register => self.accounts.register(&name, &password),
        };
        match result {
            Ok(username) => {
                self.login_form = LoginFormState::default();
                self.enter_calendar(username);
            }
            Err(err) => self.login_form.error = Some(err.to_string()),
        }
    }

    fn enter_calendar(&mut self, username: String) {
        self.user = Some(username);
        self.screen = Screen::Calendar;
        self.greet();
    }

    fn greet(&mut self) {
        if self.greeted {
            return;
        }
        if let Some(ref user) = self.user {
            let greeting = greeting_for_hour(Local::now().hour());
            self.speaker.speak(format!(
                "{}, {}. Welcome to your JARVIS calendar system.",
                greeting, user
            ));
            self.greeted = true;
        }
    }

    /// Explicit reset: back to the login form, fresh transient state.
    /// No restart needed.
    pub fn logout(&mut self) {
        self.accounts.logout();
        self.reset_session();
    }

    pub fn delete_account(&mut self) {
        if let Some(user) = self.user.clone() {
            self.accounts.delete_account(&user);
        }
        self.reset_session();
        self.status_message = Some("Account deleted".to_string());
    }

    fn reset_session(&mut self) {
        if self.voice.is_listening() {
            self.voice.stop_listening();
        }
        self.user = None;
        self.store = TaskStore::new(self.speaker.clone());
        self.screen = Screen::Login;
        self.input_mode = InputMode::Normal;
        self.login_form = LoginFormState::default();
        self.task_form = None;
        self.settings = SettingsState::default();
        self.transcript_input.clear();
        self.task_selection = 0;
        self.greeted = false;
    }

    // ── date navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
    }

    pub fn next_week(&mut self) {
        self.selected_date += chrono::Duration::weeks(1);
    }

    pub fn prev_week(&mut self) {
        self.selected_date -= chrono::Duration::weeks(1);
    }

    pub fn next_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let day = self
            .selected_date
            .day()
            .min(days_in_month(new_year, new_month));
        self.selected_date = NaiveDate::from_ymd_opt(new_year, new_month, day).expect("valid day");
    }

    pub fn prev_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let day = self
            .selected_date
            .day()
            .min(days_in_month(new_year, new_month));
        self.selected_date = NaiveDate::from_ymd_opt(new_year, new_month, day).expect("valid day");
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = self.today;
    }

    pub fn selected_date_str(&self) -> String {
        self.selected_date.format("%Y-%m-%d").to_string()
    }

    // ── tasks ──

    pub fn open_task_form(&mut self) {
        self.task_form = Some(TaskFormState::new(&self.selected_date_str()));
        self.input_mode = InputMode::TaskForm;
    }

    pub fn close_task_form(&mut self) {
        self.task_form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.clone() else {
            return;
        };
        if !form.is_valid() {
            return;
        }
        self.store.add_task(&form.title, &form.date, &form.color);
        self.close_task_form();
    }

    pub fn next_task_selection(&mut self) {
        let total = self.store.len();
        if total > 0 {
            self.task_selection = (self.task_selection + 1) % total;
        }
    }

    pub fn prev_task_selection(&mut self) {
        let total = self.store.len();
        if total > 0 {
            self.task_selection = self.task_selection.checked_sub(1).unwrap_or(total - 1);
        }
    }

    pub fn delete_selected_task(&mut self) {
        let id = self
            .store
            .upcoming()
            .get(self.task_selection)
            .map(|t| t.id.clone());
        if let Some(id) = id {
            self.store.delete_task(&id);
            self.task_selection = self
                .task_selection
                .min(self.store.len().saturating_sub(1));
        }
    }

    // ── voice ──

    pub fn toggle_listening(&mut self) {
        self.voice.toggle();
        if !self.voice.is_listening() && self.input_mode == InputMode::Transcript {
            self.cancel_transcript();
        }
    }

    pub fn begin_transcript(&mut self) {
        if self.voice.is_listening() {
            self.input_mode = InputMode::Transcript;
        } else {
            self.status_message = Some("Activate voice first (v)".to_string());
        }
    }

    pub fn cancel_transcript(&mut self) {
        self.transcript_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_transcript(&mut self) {
        let text = std::mem::take(&mut self.transcript_input);
        if !text.is_empty() {
            self.transcript_feed.push(&text);
        }
        self.input_mode = InputMode::Normal;
    }

    // ── settings ──

    pub fn open_settings(&mut self) {
        self.settings = SettingsState::default();
        self.screen = Screen::Settings;
    }

    pub fn close_settings(&mut self) {
        self.screen = Screen::Calendar;
    }

    pub fn upload_profile_image(&mut self) {
        let Some(user) = self.user.clone() else {
            return;
        };
        let path = std::path::PathBuf::from(self.settings.path_input.trim());
        match self.accounts.set_profile_image(&user, &path) {
            Ok(()) => {
                self.settings.path_input.clear();
                self.settings.message = Some("Profile picture updated".to_string());
            }
            Err(err) => {
                log::warn!("profile image upload failed: {}", err);
                self.settings.message = Some(format!("Could not read image: {}", err));
            }
        }
    }

    pub fn has_profile_image(&self) -> bool {
        self.user
            .as_deref()
            .map(|u| self.accounts.profile_image(u).is_some())
            .unwrap_or(false)
    }
}

fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::transcript_pair;
    use crate::storage::MemoryStore;

    fn app() -> (App, std::sync::Arc<std::sync::Mutex<Vec<String>>>) {
        let (speaker, spoken) = SpeechHandle::capture();
        let (feed, input) = transcript_pair(true);
        let accounts = AccountManager::new(Box::new(MemoryStore::default()));
        let voice = VoiceSession::new(Box::new(input), speaker.clone());
        (App::new(accounts, speaker, voice, feed), spoken)
    }

    #[test]
    fn greeting_buckets() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(16), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }

    #[test]
    fn register_moves_to_calendar_and_greets_once() {
        let (mut app, spoken) = app();
        app.login_form.mode = AuthMode::Register;
        app.login_form.username = "Tony".to_string();
        app.login_form.password = "m4rk42!suit".to_string();
        app.submit_login();

        assert_eq!(app.screen, Screen::Calendar);
        assert_eq!(app.user.as_deref(), Some("tony"));
        let spoken = spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].ends_with("tony. Welcome to your JARVIS calendar system."));
    }

    #[test]
    fn failed_login_surfaces_one_message() {
        let (mut app, _) = app();
        app.login_form.username = "ghost".to_string();
        app.login_form.password = "whatever".to_string();
        app.submit_login();

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(
            app.login_form.error.as_deref(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn task_form_round_trip() {
        let (mut app, _) = app();
        app.selected_date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        app.open_task_form();
        {
            let form = app.task_form.as_mut().unwrap();
            form.title = "Suit Calibration".to_string();
        }
        app.submit_task_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.task_form.is_none());
        let day = app.store.tasks_for_day("2024-06-05");
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "Suit Calibration");
    }

    #[test]
    fn invalid_task_form_is_not_submitted() {
        let (mut app, _) = app();
        app.open_task_form();
        app.submit_task_form();
        assert!(app.task_form.is_some());
        assert!(app.store.is_empty());
    }

    #[test]
    fn logout_resets_transient_state() {
        let (mut app, _) = app();
        app.login_form.mode = AuthMode::Register;
        app.login_form.username = "tony".to_string();
        app.login_form.password = "m4rk42!suit".to_string();
        app.submit_login();
        app.store.add_task("x", "2024-06-05", "#fff");

        app.logout();

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.user, None);
        assert!(app.store.is_empty());
        assert_eq!(app.accounts.current_user(), None);
    }

    #[test]
    fn typed_transcript_reaches_the_dispatcher() {
        let (mut app, spoken) = app();
        app.toggle_listening();
        app.tick();
        assert!(app.voice.is_listening());

        app.begin_transcript();
        app.transcript_input = "what's the weather".to_string();
        app.submit_transcript();
        app.tick();

        assert_eq!(app.voice.log().recent(5).len(), 1);
        assert!(spoken
            .lock()
            .unwrap()
            .last()
            .unwrap()
            .starts_with("Today's forecast"));
    }

    #[test]
    fn month_navigation_clamps_day() {
        let (mut app, _) = app();
        app.selected_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        app.next_month();
        assert_eq!(app.selected_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        app.prev_month();
        assert_eq!(app.selected_date, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
    }

    #[test]
    fn delete_selected_task_clamps_selection() {
        let (mut app, _) = app();
        app.store.add_task("a", "2024-06-01", "#fff");
        app.store.add_task("b", "2024-06-02", "#fff");
        app.task_selection = 1;

        app.delete_selected_task();
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.task_selection, 0);
        assert_eq!(app.store.upcoming()[0].title, "a");

        app.delete_selected_task();
        assert!(app.store.is_empty());
        app.delete_selected_task();
    }
}
