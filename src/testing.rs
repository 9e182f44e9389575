//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::completion::{CompletionClient, CompletionError};
use async_trait::async_trait;
use std::sync::Mutex;

/// What a [`MockCompletionClient`] does when called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Reply with the given text.
    Reply(String),
    /// Fail as if no API key were configured.
    MissingApiKey,
    /// Fail with an API-level error.
    ApiError {
        /// HTTP status to report.
        status: u16,
        /// Body to report.
        body: String,
    },
}

/// A mock completion client for testing.
///
/// Always behaves the same way and records every message it receives.
#[derive(Debug)]
pub struct MockCompletionClient {
    behavior: MockBehavior,
    calls: Mutex<Vec<String>>,
}

impl MockCompletionClient {
    /// Create a mock that replies with `text`.
    #[must_use]
    pub fn replying(text: &str) -> Self {
        Self::with_behavior(MockBehavior::Reply(text.to_string()))
    }

    /// Create a mock that reports a missing API key.
    #[must_use]
    pub fn without_api_key() -> Self {
        Self::with_behavior(MockBehavior::MissingApiKey)
    }

    /// Create a mock with the given behavior.
    #[must_use]
    pub const fn with_behavior(behavior: MockBehavior) -> Self {
        Self { behavior, calls: Mutex::new(Vec::new()) }
    }

    /// Messages received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous call panicked while recording.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        self.calls.lock().expect("mock call log poisoned").push(message.to_string());

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::MissingApiKey => Err(CompletionError::MissingApiKey),
            MockBehavior::ApiError { status, body } => {
                Err(CompletionError::Api { status: *status, body: body.clone() })
            }
        }
    }
}
