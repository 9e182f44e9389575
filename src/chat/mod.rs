//! Chat message routing.
//!
//! A message is classified by keyword into a task intent (add, list,
//! complete, delete) or a fallback that is forwarded to the completion
//! service. Both the HTTP API and the CLI session go through
//! [`MessageHandler`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskchat::chat::MessageHandler;
//! use taskchat::completion::OpenAiClient;
//! use taskchat::tasks::SqliteTaskRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Arc::new(SqliteTaskRepository::open("data/tasks.db")?);
//! let client = Arc::new(OpenAiClient::new(None, "gpt-3.5-turbo")?);
//! let handler = MessageHandler::new(repo, client);
//!
//! let reply = handler.handle("add task: buy milk").await?;
//! assert_eq!(reply, "✅ Task added: buy milk");
//! # Ok(())
//! # }
//! ```

pub mod handler;
pub mod intent;

pub use handler::{render_task_list, MessageHandler};
pub use intent::Intent;
