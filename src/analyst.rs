//! Analyst API client for backend communication.
//!
//! This module provides the HTTP client for the DataMind analyst backend:
//! chat dispatch, per-thread history, the session list, and the approval
//! endpoint that resumes a paused run.

use reqwest::Client;

use crate::models::{ApprovalRequest, ChatRequest, ChatResponse, Message, SessionSummary};

/// Default backend base URL (the backend's development bind address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "DATAMIND_API_URL";

/// Error type for analyst client operations
#[derive(Debug)]
pub enum AnalystError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// JSON deserialization failed
    Json(serde_json::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
}

impl std::fmt::Display for AnalystError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalystError::Http(e) => write!(f, "HTTP error: {}", e),
            AnalystError::Json(e) => write!(f, "JSON error: {}", e),
            AnalystError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AnalystError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalystError::Http(e) => Some(e),
            AnalystError::Json(e) => Some(e),
            AnalystError::ServerError { .. } => None,
        }
    }
}

impl From<reqwest::Error> for AnalystError {
    fn from(e: reqwest::Error) -> Self {
        AnalystError::Http(e)
    }
}

impl From<serde_json::Error> for AnalystError {
    fn from(e: serde_json::Error) -> Self {
        AnalystError::Json(e)
    }
}

/// Client for the analyst backend API.
///
/// Cheap to clone; the underlying `reqwest::Client` reuses its
/// connection pool across clones.
#[derive(Debug, Clone)]
pub struct AnalystClient {
    /// Base URL for the analyst API
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl AnalystClient {
    /// Create a client using `DATAMIND_API_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Create a client against a specific base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Send a chat message and wait for the backend's structured reply.
    ///
    /// `POST /chat` with `{message, thread_id}`. The reply is delivered
    /// atomically once the run completes or pauses for approval; there is
    /// no streaming.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AnalystError> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalystError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the full message history for a thread.
    ///
    /// `GET /history/{thread_id}`. A non-2xx status is an error at this
    /// layer; the caller decides whether that means "empty thread".
    pub async fn history(&self, thread_id: &str) -> Result<Vec<Message>, AnalystError> {
        let url = format!("{}/history/{}", self.base_url, thread_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalystError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the list of all chat sessions for the sidebar.
    ///
    /// `GET /history`.
    pub async fn sessions(&self) -> Result<Vec<SessionSummary>, AnalystError> {
        let url = format!("{}/history", self.base_url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalystError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Deliver the user's approval decision for a paused run.
    ///
    /// `POST /approve` with `{thread_id, approved}`. Any 2xx is success;
    /// the body is not inspected.
    pub async fn approve(&self, thread_id: &str, approved: bool) -> Result<(), AnalystError> {
        let url = format!("{}/approve", self.base_url);
        let request = ApprovalRequest {
            thread_id: thread_id.to_string(),
            approved,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalystError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

impl Default for AnalystClient {
    fn default() -> Self {
        Self::new()
    }
}
