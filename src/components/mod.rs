pub mod login_form;
pub mod month_view;
pub mod settings_view;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod voice_panel;

pub use login_form::{AuthMode, LoginForm, LoginFormState};
pub use month_view::MonthView;
pub use settings_view::{SettingsState, SettingsView};
pub use status_bar::StatusBar;
pub use task_form::{TaskForm, TaskFormState};
pub use task_list::TaskList;
pub use voice_panel::VoicePanel;
