use chrono::{Local, NaiveDate, TimeZone};
use uuid::Uuid;

/// A user-created, color-tagged calendar entry for one specific date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Canonical `YYYY-MM-DD`, anchored to local noon at construction.
    pub date: String,
    /// Hex color tag, display-only.
    pub color: String,
}

impl Task {
    /// Precondition: `title` is non-empty after trimming; callers validate
    /// before constructing.
    pub fn new(title: &str, date: &str, color: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            date: canonical_date(date),
            color: color.to_string(),
        }
    }

    /// "June 5" rendering for spoken confirmations.
    pub fn display_date(&self) -> String {
        match parse_date(&self.date) {
            Some(d) => d.format("%B %-d").to_string(),
            None => self.date.clone(),
        }
    }

    /// "June 5, 2024" rendering for the task list.
    pub fn display_date_full(&self) -> String {
        match parse_date(&self.date) {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Re-derive the canonical date string through a local-noon datetime.
/// Midnight would be one day earlier after a UTC round trip for anyone
/// west of Greenwich; noon keeps the calendar day fixed.
pub fn canonical_date(date: &str) -> String {
    let Some(day) = parse_date(date) else {
        return date.to_string();
    };
    let noon = day.and_hms_opt(12, 0, 0).expect("valid time");
    let anchored = Local
        .from_local_datetime(&noon)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or(day);
    anchored.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_date_is_stable() {
        assert_eq!(canonical_date("2024-06-05"), "2024-06-05");
        assert_eq!(canonical_date("2024-02-29"), "2024-02-29");
    }

    #[test]
    fn canonical_date_passes_through_garbage() {
        assert_eq!(canonical_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn new_task_trims_title_and_keeps_fields() {
        let task = Task::new("  Suit Calibration  ", "2024-06-05", "#3B82F6");
        assert_eq!(task.title, "Suit Calibration");
        assert_eq!(task.date, "2024-06-05");
        assert_eq!(task.color, "#3B82F6");
        assert!(!task.id.is_empty());
    }

    #[test]
    fn tasks_get_unique_ids() {
        let a = Task::new("a", "2024-06-05", "#fff");
        let b = Task::new("a", "2024-06-05", "#fff");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn display_dates() {
        let task = Task::new("x", "2024-06-05", "#fff");
        assert_eq!(task.display_date(), "June 5");
        assert_eq!(task.display_date_full(), "June 5, 2024");
    }
}
