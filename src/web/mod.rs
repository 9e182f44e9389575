//! HTTP surface: a JSON API for the web frontend plus its static files.
//!
//! Routes:
//!
//! - `GET /api`: service status and task count
//! - `GET /api/todos`: all tasks
//! - `POST /api/chat`: handle one chat message
//! - anything else: a file from the static directory

pub mod api;
pub mod assets;

use crate::chat::MessageHandler;
use crate::error::{Error, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Routes chat messages; also owns the task repository.
    pub handler: MessageHandler,
}

impl AppState {
    /// Create state around a message handler.
    pub const fn new(handler: MessageHandler) -> Self {
        Self { handler }
    }
}

/// Error returned by API handlers.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let router = Router::new()
        .route("/api", get(api::api_root))
        .route("/api/todos", get(api::list_todos))
        .route("/api/chat", post(api::chat));

    assets::with_static_files(router, static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, static_dir: &Path, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server running on http://{addr}");

    axum::serve(listener, build_router(state, static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
