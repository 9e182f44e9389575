//! HTTP API tests driving the full router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use taskchat::chat::MessageHandler;
use taskchat::completion::OpenAiClient;
use taskchat::tasks::SqliteTaskRepository;
use taskchat::web::{build_router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn create_app(dir: &TempDir) -> Router {
    let repo = SqliteTaskRepository::open(dir.path().join("tasks.db")).unwrap();
    let client = OpenAiClient::new(None, "gpt-3.5-turbo").unwrap();
    let state = AppState::new(MessageHandler::new(Arc::new(repo), Arc::new(client)));
    build_router(state, &dir.path().join("static"))
}

async fn post_chat(app: &Router, message: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_chat_lifecycle_over_http() {
    let dir = TempDir::new().unwrap();
    let app = create_app(&dir);

    let (status, body) = post_chat(&app, "Add task: buy milk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "✅ Task added: buy milk");
    assert_eq!(body["todos"], json!([{ "id": 1, "title": "buy milk", "completed": false }]));

    let (_, body) = post_chat(&app, "complete 1").await;
    assert_eq!(body["response"], "✅ Completed: buy milk");
    assert_eq!(body["todos"][0]["completed"], true);

    let (_, body) = post_chat(&app, "delete 1").await;
    assert_eq!(body["response"], "🗑️ Deleted: buy milk");
    assert_eq!(body["todos"], json!([]));
}

#[tokio::test]
async fn test_missing_credential_is_still_success() {
    let dir = TempDir::new().unwrap();
    let app = create_app(&dir);

    let (status, body) = post_chat(&app, "tell me a joke").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "⚠️ OPENAI_API_KEY missing in environment variables.");
}

#[tokio::test]
async fn test_api_info_counts_tasks() {
    let dir = TempDir::new().unwrap();
    let app = create_app(&dir);
    post_chat(&app, "add task: one").await;
    post_chat(&app, "add task: two").await;

    let request = Request::builder().uri("/api").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["todos"], 2);
    assert_eq!(body["version"], taskchat::VERSION);
}

#[tokio::test]
async fn test_path_traversal_is_refused() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("secret.txt"), "hidden").unwrap();
    let app = create_app(&dir);

    let request = Request::builder().uri("/../secret.txt").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_ne!(response.status(), StatusCode::OK);
}
