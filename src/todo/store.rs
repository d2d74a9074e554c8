use crate::todo::Task;
use std::fs;
use std::path::PathBuf;

/// Error type for snapshot file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Represents an I/O failure while reading or writing the snapshot file.
    #[error("todo file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Represents snapshot contents that cannot be parsed as a todo collection.
    #[error("todo file contents are not a valid todo collection: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Durable persistence for the whole todo collection.
///
/// The backing file holds a single JSON array of tasks and is the entire
/// durable state of the system. Every `load` reads the whole file and every
/// `save` overwrites it in full; there is no locking and no caching.
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the full collection from the snapshot file.
    ///
    /// A missing file is first initialized to an empty collection, so the
    /// first `load` on a fresh deployment bootstraps the snapshot.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            self.save(&[])?;
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let tasks = serde_json::from_str(&contents)?;
        Ok(tasks)
    }

    /// Serializes the given collection and overwrites the snapshot file.
    ///
    /// The snapshot stays pretty-printed so the file remains directly
    /// inspectable by hand.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> TodoStore {
        TodoStore::new(dir.path().join("todos.json"))
    }

    #[test]
    fn load_initializes_missing_file_to_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let tasks = store.load().unwrap();

        assert!(tasks.is_empty());
        let on_disk = fs::read_to_string(dir.path().join("todos.json")).unwrap();
        assert_eq!(on_disk, "[]", "bootstrap should write an empty JSON array");
    }

    #[test]
    fn save_then_load_round_trips_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"id": 1, "text": "buy milk", "completed": false, "createdAt": "2023-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        store.save(&tasks).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn save_of_loaded_collection_preserves_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[
                {"id": 2, "text": "walk dog", "completed": true, "createdAt": "2023-01-01T00:00:00Z"},
                {"id": 1, "text": "buy milk", "completed": false, "createdAt": "2023-01-02T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        store.save(&tasks).unwrap();
        let before = fs::read_to_string(dir.path().join("todos.json")).unwrap();

        store.save(&store.load().unwrap()).unwrap();

        let after = fs::read_to_string(dir.path().join("todos.json")).unwrap();
        assert_eq!(after, before, "save(load()) should be a no-op on the file");
    }

    #[test]
    fn save_overwrites_previous_contents_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"id": 1, "text": "buy milk", "completed": false, "createdAt": "2023-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        store.save(&tasks).unwrap();

        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_fails_on_malformed_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("todos.json"), "not json at all").unwrap();

        let result = store.load();

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }
}
