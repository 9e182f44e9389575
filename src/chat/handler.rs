//! Turns a chat message into a reply, touching the task repository or the
//! completion service as the message's intent requires.

use super::intent::{find_target, Intent};
use crate::completion::{CompletionClient, CompletionError};
use crate::error::Result;
use crate::tasks::{Status, Task, TaskRepository};
use std::sync::Arc;

/// Reply when the task list is empty.
pub const NO_TASKS_REPLY: &str = "📝 No tasks available.";

/// Reply when a complete/delete message matches no task.
pub const TASK_NOT_FOUND_REPLY: &str = "❌ Task not found.";

/// Reply when the completion service has no API key.
pub const MISSING_KEY_REPLY: &str = "⚠️ OPENAI_API_KEY missing in environment variables.";

/// Render tasks one per line as `{marker} {id}. {description}`.
#[must_use]
pub fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_TASKS_REPLY.to_string();
    }
    tasks
        .iter()
        .map(|t| format!("{} {}. {}", t.marker(), t.id, t.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Routes chat messages to task operations or the completion fallback.
///
/// Cheap to clone; both dependencies are shared.
#[derive(Clone)]
pub struct MessageHandler {
    repo: Arc<dyn TaskRepository>,
    completion: Arc<dyn CompletionClient>,
}

impl std::fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandler").finish_non_exhaustive()
    }
}

impl MessageHandler {
    /// Create a handler over the given repository and completion client.
    pub const fn new(repo: Arc<dyn TaskRepository>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { repo, completion }
    }

    /// The repository this handler writes to.
    pub fn repository(&self) -> &Arc<dyn TaskRepository> {
        &self.repo
    }

    /// Produce the reply for one message.
    ///
    /// Completion failures are turned into reply text, so only storage
    /// failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the task repository fails.
    pub async fn handle(&self, message: &str) -> Result<String> {
        let intent = Intent::classify(message);
        tracing::info!(intent = intent.name(), "handling chat message");

        match intent {
            Intent::Add { title } => {
                let task = self.repo.create(&title)?;
                tracing::debug!(task_id = task.id, "task added");
                Ok(format!("✅ Task added: {}", task.description))
            }
            Intent::List => Ok(render_task_list(&self.repo.get_all()?)),
            Intent::Complete => self.complete(message),
            Intent::Delete => self.delete(message),
            Intent::Fallback => Ok(self.fallback(message).await),
        }
    }

    fn complete(&self, message: &str) -> Result<String> {
        let tasks = self.repo.get_all()?;
        let Some(target) = find_target(&tasks, message) else {
            return Ok(TASK_NOT_FOUND_REPLY.to_string());
        };

        let mut task = target.clone();
        task.status = Status::Completed;
        match self.repo.update(&task) {
            Ok(updated) => Ok(format!("✅ Completed: {}", updated.description)),
            // Removed between the read and the write
            Err(e) if e.is_not_found() => Ok(TASK_NOT_FOUND_REPLY.to_string()),
            Err(e) => Err(e),
        }
    }

    fn delete(&self, message: &str) -> Result<String> {
        let tasks = self.repo.get_all()?;
        let Some(target) = find_target(&tasks, message) else {
            return Ok(TASK_NOT_FOUND_REPLY.to_string());
        };

        match self.repo.delete(target.id) {
            Ok(()) => Ok(format!("🗑️ Deleted: {}", target.description)),
            Err(e) if e.is_not_found() => Ok(TASK_NOT_FOUND_REPLY.to_string()),
            Err(e) => Err(e),
        }
    }

    async fn fallback(&self, message: &str) -> String {
        match self.completion.complete(message).await {
            Ok(reply) => reply,
            Err(CompletionError::MissingApiKey) => MISSING_KEY_REPLY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "completion request failed");
                format!("❌ OpenAI Error: {e}")
            }
        }
    }
}
