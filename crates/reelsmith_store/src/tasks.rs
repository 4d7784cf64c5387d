//! Ordered task list.

use reelsmith_core::Task;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Submitted tasks, newest first.
///
/// Every change bumps [`revision`](TaskStore::revision). Persisted as the
/// plain list of tasks.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use reelsmith_core::{ModelVariant, Orientation, Task, TaskStatus};
/// use reelsmith_store::TaskStore;
///
/// let mut store = TaskStore::new();
/// let task = |id: &str| {
///     Task::new(id, TaskStatus::Pending, "p", ModelVariant::Sora2, Orientation::Landscape, 10, Utc::now())
/// };
/// store.insert(task("a"));
/// store.insert(task("b"));
/// assert_eq!(store.tasks()[0].id(), "b");
/// assert_eq!(store.revision(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
}

impl From<Vec<Task>> for TaskStore {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks, revision: 0 }
    }
}

impl From<TaskStore> for Vec<Task> {
    fn from(store: TaskStore) -> Self {
        store.tasks
    }
}

impl TaskStore {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Non-terminal tasks in list order.
    pub fn pending(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| !t.is_terminal()).cloned().collect()
    }

    /// Put a task at the front, dropping any older record with the same id.
    pub fn insert(&mut self, task: Task) {
        self.tasks.retain(|t| t.id() != task.id());
        debug!(id = %task.id(), "Task added");
        self.tasks.insert(0, task);
        self.bump();
    }

    /// Replace the record with the same id in place.
    ///
    /// Returns false, leaving the list unchanged, if no such task exists.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            Some(slot) => {
                if *slot != task {
                    *slot = task;
                    self.bump();
                }
                true
            }
            None => false,
        }
    }

    /// Remove a task.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id() == id)?;
        let task = self.tasks.remove(index);
        debug!(id, "Task removed");
        self.bump();
        Some(task)
    }

    /// Drop every terminal task and return how many were removed.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_terminal());
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.bump();
        }
        removed
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
