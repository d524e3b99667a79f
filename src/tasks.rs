//! To-do task management
//!
//! A small SQLite-backed task list sharing the application database with
//! the session store. Unlike session history, task operations are
//! ordinary fallible storage calls and surface their errors.

use crate::error::{FocustrackError, Result};
use crate::storage;
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};
use std::path::PathBuf;

/// One to-do task
#[derive(Debug, Clone, PartialEq)]
pub struct TodoTask {
    /// Row id used to reference the task from the CLI
    pub id: i64,
    pub title: String,
    pub details: String,
    pub due_date: NaiveDate,
    pub is_done: bool,
}

impl TodoTask {
    /// Whether the task is pending and past its due date
    pub fn is_overdue(&self) -> bool {
        !self.is_done && self.due_date < Local::now().date_naive()
    }
}

/// Durable store for the task list
pub struct TaskStore {
    db_path: PathBuf,
}

impl TaskStore {
    /// Create a store backed by the default database location
    ///
    /// # Errors
    ///
    /// Returns `FocustrackError::Storage` if the location cannot be
    /// resolved or the schema cannot be initialized.
    pub fn new() -> Result<Self> {
        let db_path = storage::resolve_db_path(None)?;
        Self::new_with_path(db_path)
    }

    /// Create a store backed by the specified database file
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();
        storage::ensure_parent_dir(&db_path)?;

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                details TEXT NOT NULL DEFAULT '',
                due_date TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to create tasks table: {}", e)))?;

        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .map_err(|e| FocustrackError::Storage(format!("Failed to open database: {}", e)).into())
    }

    /// Add a task and return it with its assigned id
    pub fn add(&self, title: &str, details: &str, due_date: NaiveDate) -> Result<TodoTask> {
        let conn = self.open()?;

        conn.execute(
            "INSERT INTO tasks (title, details, due_date, done) VALUES (?1, ?2, ?3, 0)",
            params![title, details, due_date.format("%Y-%m-%d").to_string()],
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to insert task: {}", e)))?;

        Ok(TodoTask {
            id: conn.last_insert_rowid(),
            title: title.to_string(),
            details: details.to_string(),
            due_date,
            is_done: false,
        })
    }

    /// All tasks: pending first sorted by due date, then completed ones
    pub fn list(&self) -> Result<Vec<TodoTask>> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, details, due_date, done
                 FROM tasks ORDER BY done ASC, due_date ASC, id ASC",
            )
            .map_err(|e| FocustrackError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            })
            .map_err(|e| FocustrackError::Storage(format!("Failed to query tasks: {}", e)))?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, title, details, due_date, is_done) =
                row.map_err(|e| FocustrackError::Storage(format!("Failed to read task: {}", e)))?;
            let due_date = NaiveDate::parse_from_str(&due_date, "%Y-%m-%d").map_err(|e| {
                FocustrackError::Storage(format!("Invalid due date in task {}: {}", id, e))
            })?;
            tasks.push(TodoTask {
                id,
                title,
                details,
                due_date,
                is_done,
            });
        }

        Ok(tasks)
    }

    /// Mark a task as done
    ///
    /// Returns false when no task has the given id.
    pub fn set_done(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        let changed = conn
            .execute("UPDATE tasks SET done = 1 WHERE id = ?1", params![id])
            .map_err(|e| FocustrackError::Storage(format!("Failed to update task: {}", e)))?;

        Ok(changed > 0)
    }

    /// Remove a task
    ///
    /// Returns false when no task has the given id.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        let changed = conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .map_err(|e| FocustrackError::Storage(format!("Failed to delete task: {}", e)))?;

        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn create_test_store() -> (TaskStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("focustrack.db");
        let store = TaskStore::new_with_path(db_path).expect("failed to create store");
        (store, dir)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad date literal")
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let (store, _dir) = create_test_store();
        let a = store.add("first", "", date("2025-08-10")).expect("add");
        let b = store.add("second", "", date("2025-08-10")).expect("add");
        assert!(b.id > a.id);
    }

    #[test]
    fn test_list_orders_pending_by_due_date_then_done() {
        let (store, _dir) = create_test_store();
        let late = store.add("late", "", date("2025-08-20")).expect("add");
        let early = store.add("early", "", date("2025-08-08")).expect("add");
        let finished = store.add("finished", "", date("2025-08-01")).expect("add");
        assert!(store.set_done(finished.id).expect("set_done"));

        let tasks = store.list().expect("list");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, early.id);
        assert_eq!(tasks[1].id, late.id);
        assert_eq!(tasks[2].id, finished.id);
        assert!(tasks[2].is_done);
    }

    #[test]
    fn test_set_done_missing_task_returns_false() {
        let (store, _dir) = create_test_store();
        assert!(!store.set_done(999).expect("set_done"));
    }

    #[test]
    fn test_remove_deletes_task() {
        let (store, _dir) = create_test_store();
        let task = store.add("to remove", "", date("2025-08-10")).expect("add");
        assert!(store.remove(task.id).expect("remove"));
        assert!(store.list().expect("list").is_empty());
        assert!(!store.remove(task.id).expect("second remove"));
    }

    #[test]
    fn test_details_round_trip() {
        let (store, _dir) = create_test_store();
        store
            .add("with details", "chapter 4, exercises 1-3", date("2025-08-10"))
            .expect("add");

        let tasks = store.list().expect("list");
        assert_eq!(tasks[0].details, "chapter 4, exercises 1-3");
    }

    #[test]
    fn test_is_overdue() {
        let today = Local::now().date_naive();
        let overdue = TodoTask {
            id: 1,
            title: "old".to_string(),
            details: String::new(),
            due_date: today - Duration::days(1),
            is_done: false,
        };
        assert!(overdue.is_overdue());

        let done = TodoTask {
            is_done: true,
            ..overdue.clone()
        };
        assert!(!done.is_overdue());

        let upcoming = TodoTask {
            due_date: today + Duration::days(1),
            ..overdue
        };
        assert!(!upcoming.is_overdue());
    }
}
