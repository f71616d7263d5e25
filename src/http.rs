//! JSON-over-HTTP transport shared by the knowledge resolver and the
//! inference client.
//!
//! Upstream access goes through the [`JsonClient`] trait so the request
//! plumbing can be swapped out: tests substitute canned responses, and a
//! memoizing client can be dropped in the same way.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure kinds for upstream lookups.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The resource does not exist upstream (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status
    #[error("Upstream error: HTTP {0}")]
    Upstream(u16),

    /// The response body was not the JSON shape we expect
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// GET/POST transport decoding response bodies as JSON.
#[async_trait]
pub trait JsonClient: Send + Sync {
    /// GET a URL and decode the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// POST a JSON body, optionally with a bearer credential, and decode
    /// the response body as JSON.
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<Value>;
}

const USER_AGENT: &str = "Mozilla/5.0 (compatible; WikiMentor/0.1)";

/// Production transport backed by reqwest.
pub struct HttpJsonClient {
    client: reqwest::Client,
}

impl HttpJsonClient {
    /// Build a client with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonClient for HttpJsonClient {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<Value> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound);
    }
    if !status.is_success() {
        // Callers only see the status kind; keep the body in the log.
        let body = response.text().await.unwrap_or_default();
        log::warn!("Upstream returned HTTP {}: {}", status.as_u16(), body);
        return Err(FetchError::Upstream(status.as_u16()));
    }
    response
        .json::<Value>()
        .await
        .map_err(|err| FetchError::Malformed(err.to_string()))
}
