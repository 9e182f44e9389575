//! Completion service client used for fallback chat replies.
//!
//! Messages that match no task intent are forwarded verbatim to an
//! OpenAI-compatible chat completions endpoint. Failures are returned as
//! [`CompletionError`] and never retried.

use crate::config::API_KEY_VAR;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// System prompt sent ahead of every user message.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI Todo assistant.";

/// Upper bound on reply length, in tokens.
const MAX_TOKENS: u32 = 120;

/// Sampling temperature for replies.
const TEMPERATURE: f32 = 0.6;

/// Timeout for a whole completion request (60 seconds).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Why a completion request produced no reply.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API credential is configured.
    #[error("{API_KEY_VAR} is not configured")]
    MissingApiKey,

    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the service.
        body: String,
    },

    /// The service answered without any reply text.
    #[error("no response from the completion service")]
    EmptyResponse,
}

/// Trait for the external completion service.
///
/// This trait abstracts the network call so the message handler can be
/// tested without one.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produce a reply to a single user message.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is configured or the service call fails.
    async fn complete(&self, message: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Create a client. With no API key every request fails with
    /// [`CompletionError::MissingApiKey`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, api_key, model: model.into(), endpoint: OPENAI_API_URL.to_string() })
    }

    /// Send requests to a different endpoint (e.g. a compatible proxy).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request<'a>(&'a self, message: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: message.to_string() },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Pull the first choice's text out of a completion response.
fn extract_reply(completion: ChatCompletionResponse) -> Result<String, CompletionError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        tracing::debug!(model = %self.model, "requesting fallback completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.build_request(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status: status.as_u16(), body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        extract_reply(completion)
    }
}
