//! taskbook-core: task model, validation and JSON-backed persistence for Taskbook

pub mod error;
pub mod manager;
pub mod store;
pub mod task;
pub mod validate;

pub use error::{StoreError, TaskError};
pub use manager::TaskManager;
pub use store::{JsonFileStore, MemoryStore, TaskStore};
pub use task::{Priority, Task, TaskStatus};
pub use validate::{DATE_FORMAT, parse_due_date};
