//! End-to-end chat scenarios against a file-backed task database.

use proptest::prelude::*;
use std::sync::Arc;
use taskchat::chat::MessageHandler;
use taskchat::completion::OpenAiClient;
use taskchat::tasks::{SqliteTaskRepository, Status, TaskRepository};
use tempfile::TempDir;

fn create_handler(dir: &TempDir) -> MessageHandler {
    let repo = SqliteTaskRepository::open(dir.path().join("tasks.db")).unwrap();
    let client = OpenAiClient::new(None, "gpt-3.5-turbo").unwrap();
    MessageHandler::new(Arc::new(repo), Arc::new(client))
}

#[tokio::test]
async fn test_add_complete_delete_lifecycle() {
    let dir = TempDir::new().unwrap();
    let handler = create_handler(&dir);

    assert_eq!(handler.handle("Add task: buy milk").await.unwrap(), "✅ Task added: buy milk");
    assert!(handler.handle("list").await.unwrap().lines().any(|l| l == "○ 1. buy milk"));

    assert_eq!(handler.handle("complete 1").await.unwrap(), "✅ Completed: buy milk");
    assert!(handler.handle("list").await.unwrap().lines().any(|l| l == "✓ 1. buy milk"));

    assert_eq!(handler.handle("delete 1").await.unwrap(), "🗑️ Deleted: buy milk");
    assert_eq!(handler.handle("list").await.unwrap(), "📝 No tasks available.");
}

#[tokio::test]
async fn test_complete_advances_updated_at() {
    let dir = TempDir::new().unwrap();
    let handler = create_handler(&dir);
    handler.handle("add task: water plants").await.unwrap();
    let before = handler.repository().get(1).unwrap().unwrap();

    handler.handle("done 1").await.unwrap();

    let after = handler.repository().get(1).unwrap().unwrap();
    assert_eq!(after.status, Status::Completed);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_complete_unknown_id_leaves_tasks_untouched() {
    let dir = TempDir::new().unwrap();
    let handler = create_handler(&dir);
    handler.handle("add task: water plants").await.unwrap();
    let before = handler.repository().get_all().unwrap();

    assert_eq!(handler.handle("complete 9").await.unwrap(), "❌ Task not found.");
    assert_eq!(handler.repository().get_all().unwrap(), before);
}

#[tokio::test]
async fn test_fallback_without_credential() {
    let dir = TempDir::new().unwrap();
    let handler = create_handler(&dir);

    assert_eq!(
        handler.handle("what's the capital of France?").await.unwrap(),
        "⚠️ OPENAI_API_KEY missing in environment variables."
    );
}

#[tokio::test]
async fn test_tasks_survive_restart() {
    let dir = TempDir::new().unwrap();
    create_handler(&dir).handle("add task: renew passport").await.unwrap();

    let handler = create_handler(&dir);
    assert_eq!(handler.handle("show").await.unwrap(), "○ 1. renew passport");
}

proptest! {
    #[test]
    fn created_tasks_are_listed_as_pending(descriptions in prop::collection::vec("\\PC{0,40}", 1..8)) {
        let repo = SqliteTaskRepository::in_memory().unwrap();
        for description in &descriptions {
            repo.create(description).unwrap();
        }

        let tasks = repo.get_all().unwrap();
        prop_assert_eq!(tasks.len(), descriptions.len());
        for (task, description) in tasks.iter().zip(&descriptions) {
            prop_assert_eq!(&task.description, description);
            prop_assert_eq!(task.status, Status::Pending);
        }
    }
}
