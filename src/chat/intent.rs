//! Keyword-based intent classification.
//!
//! Intents are detected by substring containment on the lower-cased message,
//! checked in a fixed priority order: add, list, complete, delete. The first
//! trigger that fires wins; anything else falls back to the completion
//! service. This is a heuristic, not a grammar.

use crate::tasks::Task;

/// Titles that mean the add command carried no real title.
const PLACEHOLDER_TITLES: [&str; 2] = ["add task", "task"];

/// What a chat message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a task with the given (possibly empty) title.
    Add {
        /// Best-guess title extracted from the message.
        title: String,
    },
    /// Show all tasks.
    List,
    /// Mark the first matching task completed.
    Complete,
    /// Permanently remove the first matching task.
    Delete,
    /// No trigger matched; ask the completion service.
    Fallback,
}

impl Intent {
    /// Classify a raw message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let msg = message.to_lowercase();

        if msg.contains("add") && msg.contains("task") {
            Self::Add { title: extract_title(message) }
        } else if msg.contains("list") || msg.contains("show") {
            Self::List
        } else if msg.contains("complete") || msg.contains("done") {
            Self::Complete
        } else if msg.contains("delete") || msg.contains("remove") {
            Self::Delete
        } else {
            Self::Fallback
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Complete => "complete",
            Self::Delete => "delete",
            Self::Fallback => "fallback",
        }
    }
}

/// Extract a task title from an add command.
///
/// Takes everything after the first colon (the whole message if there is
/// none). If that is empty or just "add task"/"task", falls back to the text
/// after the first lower-case "add" with every "task" and ":" removed. An
/// empty title is a valid result.
#[must_use]
pub fn extract_title(message: &str) -> String {
    let after_colon = message.split_once(':').map_or(message, |(_, rest)| rest).trim();
    if !after_colon.is_empty() && !PLACEHOLDER_TITLES.contains(&after_colon.to_lowercase().as_str())
    {
        return after_colon.to_string();
    }

    match message.split_once("add") {
        Some((_, rest)) => rest.replace("task", "").replace(':', "").trim().to_string(),
        None => after_colon.to_string(),
    }
}

/// Find the task a complete/delete message refers to.
///
/// Returns the first task, in the given order, whose id appears anywhere in
/// the lower-cased message or whose lower-cased description is a substring
/// of it. Overlapping ids (1 vs 12) and descriptions can pick the wrong
/// task; the first match always wins.
#[must_use]
pub fn find_target<'a>(tasks: &'a [Task], message: &str) -> Option<&'a Task> {
    let msg = message.to_lowercase();
    tasks.iter().find(|task| {
        msg.contains(&task.id.to_string()) || msg.contains(&task.description.to_lowercase())
    })
}
