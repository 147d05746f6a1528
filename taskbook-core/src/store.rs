//! Task persistence: the whole collection is loaded and saved as one unit.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::task::Task;

pub trait TaskStore {
    /// Read every persisted task. A missing, unreadable or malformed store
    /// yields an empty collection rather than an error.
    fn load(&self) -> Vec<Task>;

    /// Replace the persisted collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Stores tasks as a single pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Vec<Task> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No task store at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read task store {}: {}, treating as empty",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                tracing::debug!("Loaded {} tasks from {}", tasks.len(), self.path.display());
                tasks
            }
            Err(e) => {
                tracing::warn!(
                    "Malformed task store {}: {}, treating as empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Writes to `<path>.tmp` and renames it over `<path>`, so readers see
    /// either the old collection or the new one.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, json) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&self.path, e));
        }

        tracing::debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

/// In-process store, used for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            fail_saves: false,
        }
    }

    /// A store whose `save` always fails, leaving its contents untouched.
    pub fn failing() -> Self {
        Self {
            tasks: Mutex::default(),
            fail_saves: true,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Vec<Task> {
        self.lock().clone()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::io(
                "<memory>",
                std::io::Error::other("saves disabled"),
            ));
        }
        *self.lock() = tasks.to_vec();
        Ok(())
    }
}
