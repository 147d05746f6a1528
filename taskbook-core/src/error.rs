//! Error types for task validation and store access.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write the persisted task collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize tasks")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by [`crate::TaskManager::add_task`].
///
/// Every variant except `StoreUnavailable` is detected before anything is
/// written, so a rejected call never mutates the store.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("due date must not be empty")]
    EmptyDueDate,

    #[error("invalid priority '{0}', choose from: Low, Medium, High")]
    InvalidPriority(String),

    #[error("invalid due date '{0}', use the YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("task '{0}' already exists with the same due date")]
    DuplicateTask(String),

    #[error("no task id left after {0}")]
    IdExhausted(u64),

    #[error("task store unavailable")]
    StoreUnavailable(#[from] StoreError),
}

impl TaskError {
    /// True for rule violations in the caller's input, false for store failures.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            TaskError::StoreUnavailable(_) | TaskError::IdExhausted(_)
        )
    }
}
