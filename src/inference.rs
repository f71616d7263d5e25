//! Client for the hosted chat-completions endpoint.
//!
//! One client is shared by the tutor and the flashcard synthesizer. Every
//! request carries the same fixed system role and sampling temperature;
//! only the user prompt varies.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MentorConfig;
use crate::http::{FetchError, HttpJsonClient, JsonClient};

/// System role sent with every request
pub const SYSTEM_PROMPT: &str = "You are a helpful and concise AI tutor.";

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum InferenceError {
    /// No credential was configured for the inference endpoint
    #[error("No inference API key configured")]
    MissingApiKey,

    /// The endpoint answered with a non-success status
    #[error("Inference API error: HTTP {0}")]
    Api(u16),

    /// The request never completed
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response did not match the chat-completions wire shape
    #[error("Malformed inference response")]
    MalformedResponse,
}

impl From<FetchError> for InferenceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound => InferenceError::Api(404),
            FetchError::Upstream(status) => InferenceError::Api(status),
            FetchError::Transport(reason) => InferenceError::Connection(reason),
            FetchError::Malformed(_) => InferenceError::MalformedResponse,
        }
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(_: serde_json::Error) -> Self {
        InferenceError::MalformedResponse
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat-completions client shared by the tutor and the synthesizer.
#[derive(Clone)]
pub struct InferenceClient {
    client: Arc<dyn JsonClient>,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl InferenceClient {
    /// Build a client with the default HTTP transport.
    pub fn new(config: &MentorConfig) -> Result<Self, InferenceError> {
        let client = HttpJsonClient::new(Duration::from_secs(config.request_timeout_secs))
            .map_err(InferenceError::from)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build a client over a caller-supplied transport.
    pub fn with_client(config: &MentorConfig, client: Arc<dyn JsonClient>) -> Self {
        Self {
            client,
            url: config.inference_url.clone(),
            model: config.inference_model.clone(),
            api_key: config.inference_api_key.clone(),
        }
    }

    /// One completion for one prompt, under the fixed tutor system role.
    pub async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InferenceError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };
        let body = serde_json::to_value(&request)?;

        let value = self.client.post_json(&self.url, Some(api_key), &body).await?;
        let response: ChatCompletionResponse = serde_json::from_value(value)?;
        reply_text(response).ok_or(InferenceError::MalformedResponse)
    }
}

/// Generated text at `choices[0].message.content`.
fn reply_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
}
