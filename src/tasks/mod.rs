//! Task persistence.
//!
//! This module provides the to-do list storage:
//! - Tasks with a description, a pending/completed status and timestamps
//! - A repository trait so handlers can be tested against any store
//! - A `SQLite` implementation holding one connection for the process lifetime
//!
//! # Example
//!
//! ```no_run
//! use taskchat::tasks::{SqliteTaskRepository, Status, TaskRepository};
//!
//! let repo = SqliteTaskRepository::open("/tmp/tasks.db").unwrap();
//!
//! let mut task = repo.create("buy milk").unwrap();
//! task.status = Status::Completed;
//! repo.update(&task).unwrap();
//!
//! for task in repo.get_all().unwrap() {
//!     println!("{} {}. {}", task.marker(), task.id, task.description);
//! }
//! ```

pub mod models;
pub mod store;

pub use models::{InvalidStatus, Status, Task};
pub use store::{SqliteTaskRepository, TaskRepository};
