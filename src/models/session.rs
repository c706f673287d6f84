//! Session summaries for the sidebar list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of `GET /history`: a past conversation the user can reopen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    /// Thread ID identifying the session
    pub thread_id: String,
    /// Human-readable title (derived by the backend from the first message)
    #[serde(default)]
    pub title: Option<String>,
    /// When the session was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    /// Title to display, falling back to the thread ID.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => &self.thread_id,
        }
    }
}
