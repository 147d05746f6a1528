//! Task record as persisted in the JSON store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "Thấp")]
    Low,
    #[serde(alias = "Trung bình")]
    Medium,
    #[serde(alias = "Cao")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Label used by stores written with Vietnamese priority names.
    fn legacy_label(self) -> &'static str {
        match self {
            Priority::Low => "Thấp",
            Priority::Medium => "Trung bình",
            Priority::High => "Cao",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    /// Exact match against the closed label set; no trimming or case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label() == s || p.legacy_label() == s)
            .ok_or_else(|| TaskError::InvalidPriority(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "not completed", alias = "Chưa hoàn thành")]
    NotCompleted,
    #[serde(rename = "completed", alias = "Hoàn thành")]
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotCompleted => f.pad("not completed"),
            TaskStatus::Completed => f.pad("completed"),
        }
    }
}

/// A single to-do item. Serialized keys match the on-disk layout:
/// `id`, `title`, `description`, `due_date`, `priority`, `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Written as `YYYY-MM-DD`.
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
            status: TaskStatus::NotCompleted,
        }
    }

    /// Same title (case-insensitive, surrounding whitespace ignored) and same due date.
    pub fn is_duplicate_of(&self, title: &str, due_date: NaiveDate) -> bool {
        self.due_date == due_date && self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::NotCompleted && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn priority_accepts_both_label_sets() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Cao".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Trung bình".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Thấp".parse::<Priority>().unwrap(), Priority::Low);
    }

    #[test]
    fn priority_rejects_outside_closed_set() {
        for bad in ["Urgent", "high", " Low", ""] {
            assert!(matches!(
                bad.parse::<Priority>(),
                Err(TaskError::InvalidPriority(s)) if s == bad
            ));
        }
    }

    #[test]
    fn priority_is_ordered() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn serializes_with_store_keys() {
        let t = Task::new(1, "Buy books", "Software engineering", date(2025, 7, 20), Priority::High);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "id": 1,
                "title": "Buy books",
                "description": "Software engineering",
                "due_date": "2025-07-20",
                "priority": "High",
                "status": "not completed"
            })
        );
    }

    #[test]
    fn reads_vietnamese_labels() {
        let raw = r#"{"id":3,"title":"Mua sách","description":"","due_date":"2025-07-20","priority":"Trung bình","status":"Chưa hoàn thành"}"#;
        let t: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.status, TaskStatus::NotCompleted);
    }

    #[test]
    fn duplicate_ignores_title_case() {
        let t = Task::new(1, "Mua Sách", "", date(2025, 7, 20), Priority::High);
        assert!(t.is_duplicate_of("mua sách", date(2025, 7, 20)));
        assert!(!t.is_duplicate_of("mua sách", date(2025, 7, 21)));
        assert!(!t.is_duplicate_of("mua vở", date(2025, 7, 20)));
    }

    #[test]
    fn completed_tasks_are_never_overdue() {
        let mut t = Task::new(1, "x", "", date(2025, 7, 20), Priority::Low);
        assert!(t.is_overdue(date(2025, 7, 21)));
        assert!(!t.is_overdue(date(2025, 7, 20)));
        t.status = TaskStatus::Completed;
        assert!(!t.is_overdue(date(2025, 7, 21)));
    }
}
