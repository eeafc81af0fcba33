use chrono::{Datelike, NaiveDate};

use crate::speech::SpeechHandle;

use super::task::Task;

/// One slot in the month grid: a leading blank (day `None`) or a calendar
/// day with its tasks.
pub struct MonthCell<'a> {
    pub day: Option<u32>,
    pub date: Option<String>,
    pub tasks: Vec<&'a Task>,
}

/// Owns the session's tasks and answers day/month queries. Transient:
/// tasks live for one login session only.
pub struct TaskStore {
    tasks: Vec<Task>,
    speaker: SpeechHandle,
}

impl TaskStore {
    pub fn new(speaker: SpeechHandle) -> Self {
        Self {
            tasks: Vec::new(),
            speaker,
        }
    }

    /// Appends a task and announces it. Precondition: `title` is non-empty
    /// after trimming (validated by the form, not re-checked here).
    pub fn add_task(&mut self, title: &str, date: &str, color: &str) -> &Task {
        let task = Task::new(title, date, color);
        self.speaker.speak(format!(
            "Task \"{}\" added for {}",
            task.title,
            task.display_date()
        ));
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    /// Idempotent: unknown ids are a no-op.
    pub fn delete_task(&mut self, id: &str) {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
        }
    }

    /// Tasks whose canonical date equals `date`, in insertion order.
    pub fn tasks_for_day(&self, date: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    /// All tasks sorted ascending by date. The zero-padded ISO format makes
    /// the lexicographic compare correct; the sort is stable so same-day
    /// tasks keep insertion order.
    pub fn upcoming(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| a.date.cmp(&b.date));
        tasks
    }

    /// Leading blanks so day 1 lands under its weekday column (0 = Sunday),
    /// then one cell per day of the month.
    pub fn month_grid(&self, year: i32, month: u32) -> Vec<MonthCell<'_>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
        let lead = first.weekday().num_days_from_sunday() as usize;

        let mut cells = Vec::with_capacity(lead + 31);
        for _ in 0..lead {
            cells.push(MonthCell {
                day: None,
                date: None,
                tasks: Vec::new(),
            });
        }
        for day in 1..=days_in_month(year, month) {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .expect("valid day")
                .format("%Y-%m-%d")
                .to_string();
            let tasks = self.tasks_for_day(&date);
            cells.push(MonthCell {
                day: Some(day),
                date: Some(date),
                tasks,
            });
        }
        cells
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid month")
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).expect("valid month"))
    .num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        let (speaker, _) = SpeechHandle::capture();
        TaskStore::new(speaker)
    }

    #[test]
    fn add_then_query_day_and_upcoming() {
        let mut store = store();
        store.add_task("Board meeting", "2024-06-10", "#DC2626");
        store.add_task("Suit Calibration", "2024-06-05", "#3B82F6");

        let day = store.tasks_for_day("2024-06-05");
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "Suit Calibration");
        assert_eq!(day[0].color, "#3B82F6");

        let upcoming = store.upcoming();
        assert_eq!(upcoming[0].title, "Suit Calibration");
        assert_eq!(upcoming[1].title, "Board meeting");
    }

    #[test]
    fn add_task_speaks_confirmation() {
        let (speaker, spoken) = SpeechHandle::capture();
        let mut store = TaskStore::new(speaker);
        store.add_task("Suit Calibration", "2024-06-05", "#3B82F6");

        assert_eq!(
            *spoken.lock().unwrap(),
            vec!["Task \"Suit Calibration\" added for June 5"]
        );
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = store();
        let id = store.add_task("one", "2024-06-05", "#fff").id.clone();
        store.add_task("two", "2024-06-06", "#fff");

        store.delete_task("no-such-id");
        assert_eq!(store.len(), 2);

        store.delete_task(&id);
        assert_eq!(store.len(), 1);
        store.delete_task(&id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upcoming_sort_is_stable_for_equal_dates() {
        let mut store = store();
        store.add_task("first", "2024-06-05", "#fff");
        store.add_task("second", "2024-06-05", "#fff");
        store.add_task("earlier", "2024-06-01", "#fff");

        let titles: Vec<&str> = store.upcoming().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn month_grid_shape() {
        let store = store();
        // June 2024 starts on a Saturday: 6 blanks, 30 days.
        let grid = store.month_grid(2024, 6);
        assert_eq!(grid.len(), 6 + 30);
        assert!(grid[..6].iter().all(|c| c.day.is_none()));
        let days: Vec<u32> = grid.iter().filter_map(|c| c.day).collect();
        assert_eq!(days, (1..=30).collect::<Vec<u32>>());
    }

    #[test]
    fn month_grid_handles_leap_february() {
        let store = store();
        // 2024-02-01 is a Thursday.
        let grid = store.month_grid(2024, 2);
        assert_eq!(grid.len(), 4 + 29);
        assert_eq!(grid.last().unwrap().day, Some(29));
    }

    #[test]
    fn month_grid_places_tasks_in_their_cell() {
        let mut store = store();
        store.add_task("Suit Calibration", "2024-06-05", "#3B82F6");

        let grid = store.month_grid(2024, 6);
        let cell = grid
            .iter()
            .find(|c| c.day == Some(5))
            .expect("day 5 present");
        assert_eq!(cell.date.as_deref(), Some("2024-06-05"));
        assert_eq!(cell.tasks.len(), 1);
        assert_eq!(cell.tasks[0].title, "Suit Calibration");

        assert!(grid
            .iter()
            .filter(|c| c.day != Some(5))
            .all(|c| c.tasks.is_empty()));
    }

    #[test]
    fn days_in_month_covers_28_to_31() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
