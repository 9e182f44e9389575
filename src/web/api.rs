//! JSON API handlers.

use super::{ApiError, AppState};
use crate::tasks::Task;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Service name reported by `GET /api`.
pub const SERVICE_NAME: &str = "AI Todo Chatbot with SQLite";

/// Storage description reported by `GET /api`.
pub const DATABASE_KIND: &str = "SQLite (persistent)";

/// A task as the web frontend sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDto {
    /// Task id.
    pub id: i64,
    /// Task description.
    pub title: String,
    /// Whether the task is completed.
    pub completed: bool,
}

impl From<Task> for TodoDto {
    fn from(task: Task) -> Self {
        Self { id: task.id, completed: task.is_completed(), title: task.description }
    }
}

/// Response for `GET /api`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Always `"ok"`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Number of stored tasks.
    pub todos: usize,
    /// Storage description.
    pub database: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Requested reply language. Accepted but not used.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Response for `POST /api/chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,
    /// All tasks after the message was handled.
    pub todos: Vec<TodoDto>,
}

fn all_todos(state: &AppState) -> Result<Vec<TodoDto>, ApiError> {
    let tasks = state.handler.repository().get_all()?;
    Ok(tasks.into_iter().map(TodoDto::from).collect())
}

/// `GET /api`: service status and task count.
#[tracing::instrument(skip(state))]
pub async fn api_root(State(state): State<AppState>) -> Result<Json<ServiceInfo>, ApiError> {
    let todos = state.handler.repository().count()?;
    Ok(Json(ServiceInfo {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: crate::VERSION.to_string(),
        todos,
        database: DATABASE_KIND.to_string(),
    }))
}

/// `GET /api/todos`: every task in id order.
#[tracing::instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoDto>>, ApiError> {
    Ok(Json(all_todos(&state)?))
}

/// `POST /api/chat`: handle one message and return the reply with the
/// updated task list.
#[tracing::instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    tracing::debug!(language = %request.language, "chat request");
    let response = state.handler.handle(&request.message).await?;
    let todos = all_todos(&state)?;
    Ok(Json(ChatResponse { response, todos }))
}
