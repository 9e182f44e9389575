//! Static frontend files.
//!
//! Files are served from a single directory. A request for `/` gets
//! `index.html`; when the frontend is missing the API still answers with a
//! short JSON note.

use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use std::path::Path;
use tower_http::services::ServeDir;

/// Reply for `/` when there is no `index.html`.
pub const FRONTEND_MISSING: &str = "Frontend not found. API is running.";

async fn file_not_found(uri: Uri) -> Response {
    if uri.path() == "/" {
        return Json(json!({ "message": FRONTEND_MISSING })).into_response();
    }
    tracing::debug!(path = uri.path(), "static file not found");
    (StatusCode::NOT_FOUND, Json(json!({ "error": "File not found" }))).into_response()
}

/// Serve files under `dir` for every path the router does not otherwise
/// handle, falling back to JSON replies.
///
/// Paths that would escape `dir` are refused.
pub fn with_static_files<S>(router: Router<S>, dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.fallback_service(ServeDir::new(dir).fallback(file_not_found.into_service()))
}
