pub mod store;
pub mod task;

pub use store::{days_in_month, MonthCell, TaskStore};
pub use task::Task;
