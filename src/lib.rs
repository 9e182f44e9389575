//! # `taskchat`
//!
//! A small task-tracking chat assistant. Messages such as "add task: buy
//! milk" or "complete 1" manage a persistent task list; anything else is
//! answered by an OpenAI-compatible completion service.
//!
//! The same [`chat::MessageHandler`] backs both surfaces: an HTTP API with a
//! static web frontend ([`web`]) and an interactive terminal session
//! ([`session`]).

pub mod chat;
#[cfg(feature = "cli")]
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod session;
pub mod tasks;
pub mod testing;
pub mod web;

pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
