use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod api;
pub mod store;

use store::{StoreError, TodoStore};

/// A single to-do item as persisted in the snapshot file and served over the
/// wire, `{id, text, completed, createdAt}`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: u64,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Returns the ID of the task.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the task text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp of the task.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Error type for TodoService operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    /// Represents a create request without any text.
    #[error("Text is required")]
    MissingText,
    /// Represents a reference to a task ID that is not in the collection.
    #[error("Todo with ID {0} not found")]
    TodoNotFound(u64),
    /// Represents a failure at the persistence boundary.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Business rules around tasks; the only place system-managed fields
/// (`id`, `created_at`) are assigned.
///
/// Every operation is one full load-mutate-save cycle against the store, so
/// each request observes the latest on-disk state and nothing is cached
/// across requests.
pub struct TodoService<'a> {
    store: &'a TodoStore,
}

impl TodoService<'_> {
    pub fn new(store: &TodoStore) -> TodoService {
        TodoService { store }
    }

    /// Returns the full collection in insertion order.
    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<Task>, TodoServiceError> {
        Ok(self.store.load()?)
    }

    /// Creates a new task from the given text.
    ///
    /// # Arguments
    ///
    /// * `text` - The task text; must be non-empty.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` if successful, or an error
    /// otherwise.
    #[tracing::instrument(skip(self))]
    pub fn create(&self, text: String) -> Result<Task, TodoServiceError> {
        if text.is_empty() {
            return Err(TodoServiceError::MissingText);
        }

        let mut tasks = self.store.load()?;
        let task = Task {
            id: next_id(&tasks),
            text,
            completed: false,
            created_at: Utc::now(),
        };
        tasks.push(task.clone());
        self.store.save(&tasks)?;
        Ok(task)
    }

    /// Applies a partial update to the task with the given ID.
    ///
    /// Only the fields provided are changed; an explicit `false` or empty
    /// string is applied, an absent field is left alone. `id` and
    /// `created_at` never change.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task` if successful, or an error
    /// otherwise.
    #[tracing::instrument(skip(self))]
    pub fn update(
        &self,
        id: u64,
        text: Option<String>,
        completed: Option<bool>,
    ) -> Result<Task, TodoServiceError> {
        let mut tasks = self.store.load()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TodoServiceError::TodoNotFound(id))?;

        if let Some(text) = text {
            task.text = text;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        let updated = task.clone();

        self.store.save(&tasks)?;
        Ok(updated)
    }

    /// Removes the task with the given ID, leaving the order of the rest
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<(), TodoServiceError> {
        let mut tasks = self.store.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(TodoServiceError::TodoNotFound(id));
        }
        self.store.save(&tasks)?;
        Ok(())
    }
}

/// Picks a fresh ID: the current wall-clock milliseconds, bumped past the
/// largest ID already in the collection so rapid successive creates (or a
/// clock running behind the persisted IDs) cannot collide.
fn next_id(tasks: &[Task]) -> u64 {
    let now_ms = Utc::now().timestamp_millis() as u64;
    match tasks.iter().map(Task::id).max() {
        Some(max_id) => now_ms.max(max_id + 1),
        None => now_ms,
    }
}
