//! Field validation for new tasks.
//!
//! Checks run in a fixed order and the first failure wins:
//! title, due date presence, priority, due date format.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::TaskError;
use crate::task::Priority;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone accepts unpadded fields like "2025-7-2".
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date regex"));

/// Parse a due date in strict `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored. Wrong separators, missing padding and
/// dates that don't exist on the calendar (e.g. `2025-02-30`) are rejected.
pub fn parse_due_date(text: &str) -> Result<NaiveDate, TaskError> {
    let s = text.trim();
    if !DATE_SHAPE.is_match(s) {
        return Err(TaskError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| TaskError::InvalidDate(s.to_string()))
}

/// Validated input for a new task. Duplicate detection happens later,
/// against the loaded store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

pub fn validate_new_task(
    title: &str,
    description: &str,
    due_date: &str,
    priority: &str,
) -> Result<NewTask, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if due_date.trim().is_empty() {
        return Err(TaskError::EmptyDueDate);
    }
    let priority: Priority = priority.parse()?;
    let due_date = parse_due_date(due_date)?;

    Ok(NewTask {
        title: title.to_string(),
        description: description.to_string(),
        due_date,
        priority,
    })
}
