//! Task repository trait and `SQLite` implementation.

use crate::error::{Error, Result};
use crate::tasks::models::{Status, Task};
use chrono::{DateTime, TimeDelta, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Columns selected for every task query, in the order `parse_task` expects.
const TASK_COLUMNS: &str = "id, description, status, created_at, updated_at";

/// Trait for task storage operations.
///
/// Every mutating call is durable once it returns. Implementations are shared
/// between request handlers, so they must serialize writers themselves.
#[allow(clippy::missing_errors_doc)]
pub trait TaskRepository: Send + Sync {
    /// Persist a new pending task and return the stored record.
    fn create(&self, description: &str) -> Result<Task>;

    /// Get a task by id.
    fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Get all tasks in insertion order (ascending id).
    fn get_all(&self) -> Result<Vec<Task>>;

    /// Overwrite the stored task with `task.id`, refreshing `updated_at`.
    ///
    /// Fails with [`Error::TaskNotFound`] if no such task exists.
    fn update(&self, task: &Task) -> Result<Task>;

    /// Permanently remove a task.
    ///
    /// Fails with [`Error::TaskNotFound`] if no such task exists, so a second
    /// delete of the same id is an error.
    fn delete(&self, id: i64) -> Result<()>;

    /// Number of stored tasks.
    fn count(&self) -> Result<usize> {
        Ok(self.get_all()?.len())
    }
}

/// SQLite-backed task repository.
///
/// Holds a single connection for the lifetime of the repository. Access is
/// serialized through a mutex: one reader or writer at a time.
#[derive(Debug)]
pub struct SqliteTaskRepository {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteTaskRepository {
    /// Open (or create) the task database at the given path.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        let repo = Self { conn: Mutex::new(conn), db_path: Some(db_path) };
        repo.init_schema()?;
        Ok(repo)
    }

    /// Create a repository backed by a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let repo = Self { conn: Mutex::new(Connection::open_in_memory()?), db_path: None };
        repo.init_schema()?;
        Ok(repo)
    }

    /// Get the database path, or `None` for an in-memory database.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::StoragePoisoned)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'completed')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Parse a task from a row.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_str: String = row.get(2)?;

        Ok(Task {
            id: row.get(0)?,
            description: row.get(1)?,
            status: Status::from_str(&status_str).unwrap_or_default(),
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }
}

/// The next `updated_at` value: now, or just after `previous` if the clock
/// has not moved past it.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + TimeDelta::microseconds(1))
}

impl TaskRepository for SqliteTaskRepository {
    fn create(&self, description: &str) -> Result<Task> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO tasks (description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![description, Status::Pending.as_str(), now],
        )?;

        let id = conn.last_insert_rowid();
        let task = Self::fetch(&conn, id)?.ok_or(Error::TaskNotFound(id))?;
        tracing::debug!(task_id = task.id, "task created");
        Ok(task)
    }

    fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn()?;
        Self::fetch(&conn, id)
    }

    fn get_all(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC"))?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn update(&self, task: &Task) -> Result<Task> {
        let conn = self.conn()?;
        let stored = Self::fetch(&conn, task.id)?.ok_or(Error::TaskNotFound(task.id))?;
        let updated_at = next_timestamp(stored.updated_at);

        conn.execute(
            "UPDATE tasks SET description = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
            params![task.description, task.status.as_str(), updated_at, task.id],
        )?;

        tracing::debug!(task_id = task.id, status = %task.status, "task updated");
        Ok(Task {
            id: stored.id,
            description: task.description.clone(),
            status: task.status,
            created_at: stored.created_at,
            updated_at,
        })
    }

    fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(Error::TaskNotFound(id));
        }
        tracing::debug!(task_id = id, "task deleted");
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteTaskRepository) {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteTaskRepository::open(&db_path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_and_get_task() {
        let (_dir, store) = create_test_store();

        let task = store.create("buy milk").unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.description, "buy milk");
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.created_at, task.updated_at);

        let fetched = store.get(task.id).unwrap().unwrap();
        assert_eq!(fetched, task);
    }

    #[test]
    fn test_get_nonexistent_task() {
        let (_dir, store) = create_test_store();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_get_all_in_insertion_order() {
        let (_dir, store) = create_test_store();
        store.create("first").unwrap();
        store.create("second").unwrap();
        store.create("third").unwrap();

        let tasks = store.get_all().unwrap();
        let descriptions: Vec<_> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
        assert!(tasks.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_empty_description_is_accepted() {
        let (_dir, store) = create_test_store();
        let task = store.create("").unwrap();
        assert_eq!(task.description, "");
    }

    #[test]
    fn test_update_marks_completed_and_advances_timestamp() {
        let (_dir, store) = create_test_store();
        let mut task = store.create("file taxes").unwrap();

        task.status = Status::Completed;
        let updated = store.update(&task).unwrap();

        assert_eq!(updated.status, Status::Completed);
        assert!(updated.updated_at > task.updated_at);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(store.get(task.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn test_repeated_updates_strictly_increase_timestamp() {
        let (_dir, store) = create_test_store();
        let task = store.create("stretch").unwrap();

        let first = store.update(&task).unwrap();
        let second = store.update(&first).unwrap();
        assert!(second.updated_at > first.updated_at);
    }

    #[test]
    fn test_update_nonexistent_task() {
        let (_dir, store) = create_test_store();
        let mut task = store.create("real").unwrap();
        task.id = 99;

        let err = store.update(&task).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(99)));
    }

    #[test]
    fn test_delete_task() {
        let (_dir, store) = create_test_store();
        let task = store.create("to delete").unwrap();

        store.delete(task.id).unwrap();
        assert!(store.get(task.id).unwrap().is_none());
        assert!(store.get_all().unwrap().is_empty());

        // Delete again is an error
        let err = store.delete(task.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, store) = create_test_store();
        let first = store.create("one").unwrap();
        store.delete(first.id).unwrap();

        let second = store.create("two").unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_count() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        store.create("a").unwrap();
        store.create("b").unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_data_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("tasks.db");

        {
            let store = SqliteTaskRepository::open(&db_path).unwrap();
            let mut task = store.create("persisted").unwrap();
            task.status = Status::Completed;
            store.update(&task).unwrap();
        }

        let store = SqliteTaskRepository::open(&db_path).unwrap();
        let tasks = store.get_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "persisted");
        assert_eq!(tasks[0].status, Status::Completed);
        assert_eq!(store.db_path(), Some(db_path.as_path()));
    }

    #[test]
    fn test_open_corrupted_database_fails() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("tasks.db");
        std::fs::write(&db_path, "this is not a valid sqlite database").unwrap();

        let err = SqliteTaskRepository::open(&db_path).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteTaskRepository::in_memory().unwrap();
        store.create("ephemeral").unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.db_path().is_none());
    }
}
