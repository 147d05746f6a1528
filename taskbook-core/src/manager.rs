//! TaskManager: validates new tasks and runs the load-check-append-save cycle.
//!
//! There is no locking around the cycle. Two processes adding tasks to the
//! same store at once can lose one of the writes.

use chrono::NaiveDate;

use crate::error::TaskError;
use crate::store::TaskStore;
use crate::task::Task;
use crate::validate::validate_new_task;

#[derive(Debug)]
pub struct TaskManager<S> {
    store: S,
}

impl<S: TaskStore> TaskManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new task.
    ///
    /// Field checks run first, then the store is loaded and scanned for a task
    /// with the same title (case-insensitive) and due date. The new id is one
    /// past the largest id already stored.
    pub fn add_task(
        &self,
        title: &str,
        description: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Task, TaskError> {
        let result = self.try_add(title, description, due_date, priority);
        match &result {
            Ok(task) => tracing::info!(id = task.id, title = %task.title, "Added task"),
            Err(e) => tracing::info!(title = %title.trim(), "Rejected task: {}", e),
        }
        result
    }

    fn try_add(
        &self,
        title: &str,
        description: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Task, TaskError> {
        let input = validate_new_task(title, description, due_date, priority)?;

        let mut tasks = self.store.load();
        if tasks
            .iter()
            .any(|t| t.is_duplicate_of(&input.title, input.due_date))
        {
            return Err(TaskError::DuplicateTask(input.title));
        }

        let task = Task::new(
            next_id(&tasks)?,
            input.title,
            input.description,
            input.due_date,
            input.priority,
        );
        tasks.push(task.clone());
        self.store.save(&tasks)?;
        Ok(task)
    }

    /// Every stored task, ordered by id.
    pub fn list_tasks(&self) -> Vec<Task> {
        let mut tasks = self.store.load();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    /// Open tasks due before `today`, earliest first.
    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .store
            .load()
            .into_iter()
            .filter(|t| t.is_overdue(today))
            .collect();
        tasks.sort_by_key(|t| (t.due_date, t.id));
        tasks
    }
}

fn next_id(tasks: &[Task]) -> Result<u64, TaskError> {
    let max = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(TaskError::IdExhausted(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::task::{Priority, TaskStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_task_gets_id_one() {
        let mgr = TaskManager::new(MemoryStore::new());
        let t = mgr
            .add_task("Buy books", "Software engineering", "2025-07-20", "High")
            .unwrap();
        assert_eq!(t.id, 1);
        assert_eq!(t.status, TaskStatus::NotCompleted);
        assert_eq!(t.due_date, date(2025, 7, 20));
        assert_eq!(mgr.store().len(), 1);
    }

    #[test]
    fn id_follows_largest_stored_id() {
        let existing = vec![
            Task::new(7, "a", "", date(2025, 1, 1), Priority::Low),
            Task::new(3, "b", "", date(2025, 1, 2), Priority::Low),
        ];
        let mgr = TaskManager::new(MemoryStore::with_tasks(existing));
        let t = mgr.add_task("c", "", "2025-01-03", "Low").unwrap();
        assert_eq!(t.id, 8);
    }

    #[test]
    fn duplicate_is_case_insensitive() {
        let mgr = TaskManager::new(MemoryStore::new());
        mgr.add_task("Buy Books", "", "2025-07-20", "High").unwrap();

        let err = mgr.add_task("  buy books", "other", "2025-07-20", "Low").unwrap_err();
        assert!(matches!(err, TaskError::DuplicateTask(ref title) if title == "buy books"));
        assert_eq!(mgr.store().len(), 1);

        // Same title on another day is fine.
        assert_eq!(mgr.add_task("buy books", "", "2025-07-21", "Low").unwrap().id, 2);
    }

    #[test]
    fn rejected_input_consumes_no_id() {
        let mgr = TaskManager::new(MemoryStore::new());
        assert!(mgr.add_task("x", "", "2025-02-30", "Low").is_err());
        assert!(mgr.add_task("x", "", "2025-02-28", "Urgent").is_err());
        assert!(mgr.store().is_empty());
        assert_eq!(mgr.add_task("x", "", "2025-02-28", "Low").unwrap().id, 1);
    }

    #[test]
    fn largest_possible_id_stops_new_tasks() {
        let existing = vec![Task::new(u64::MAX, "a", "", date(2025, 7, 20), Priority::Low)];
        let mgr = TaskManager::new(MemoryStore::with_tasks(existing));

        let err = mgr.add_task("b", "", "2025-07-21", "Low").unwrap_err();
        assert!(matches!(err, TaskError::IdExhausted(u64::MAX)));
        assert_eq!(mgr.store().len(), 1);
    }

    #[test]
    fn save_failure_surfaces_as_store_unavailable() {
        let mgr = TaskManager::new(MemoryStore::failing());
        let err = mgr.add_task("x", "", "2025-07-20", "Low").unwrap_err();
        assert!(matches!(err, TaskError::StoreUnavailable(_)));
        assert!(mgr.list_tasks().is_empty());
    }

    #[test]
    fn overdue_excludes_completed_and_future() {
        let mut done = Task::new(1, "done", "", date(2025, 1, 1), Priority::High);
        done.status = TaskStatus::Completed;
        let tasks = vec![
            done,
            Task::new(2, "late", "", date(2025, 3, 1), Priority::Low),
            Task::new(3, "later", "", date(2025, 2, 1), Priority::Low),
            Task::new(4, "today", "", date(2025, 6, 1), Priority::Low),
            Task::new(5, "future", "", date(2025, 9, 1), Priority::Low),
        ];
        let mgr = TaskManager::new(MemoryStore::with_tasks(tasks));
        let ids: Vec<u64> = mgr.overdue_tasks(date(2025, 6, 1)).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn list_is_sorted_by_id() {
        let tasks = vec![
            Task::new(2, "b", "", date(2025, 1, 1), Priority::Low),
            Task::new(1, "a", "", date(2025, 1, 1), Priority::Low),
        ];
        let mgr = TaskManager::new(MemoryStore::with_tasks(tasks));
        let ids: Vec<u64> = mgr.list_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
