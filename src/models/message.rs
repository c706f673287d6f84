//! Conversation messages exchanged with the analyst backend.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::ApprovalStatus;

use super::chart::ChartSpec;
use super::request::ChatResponse;

/// Assistant acknowledgement when the backend produced a SQL query.
pub const CONTENT_ANALYZED: &str = "I've analyzed the data for you.";
/// Assistant acknowledgement when the backend found nothing relevant.
pub const CONTENT_NO_DATA: &str = "I couldn't find any relevant data.";
/// Assistant-authored message appended when a chat dispatch fails.
pub const CONTENT_CONNECTION_ERROR: &str =
    "Sorry, I encountered an error connecting to the analyst brain.";

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message in the conversation log.
///
/// User messages only carry `role` and `content`. Assistant messages may
/// additionally carry the structured payloads the backend's agents produced.
/// The wire shape matches the backend's history rows exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    #[serde(default)]
    pub content: String,
    /// SQL query generated by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    /// Chart specification, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_spec: Option<ChartSpec>,
    /// Draft email awaiting approval, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_draft: Option<String>,
    /// Whether this message gates a side-effecting action on user consent
    #[serde(default)]
    pub needs_approval: bool,
    /// Thread the message belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Labels of the backend capabilities that fired, in fixed order
    #[serde(default)]
    pub steps: Vec<String>,
    /// Approval lifecycle for this message. Runtime-only: the backend's
    /// history rows do not persist it, so it is rebuilt on load.
    #[serde(skip)]
    pub approval: Option<ApprovalStatus>,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            sql_query: None,
            visualization_spec: None,
            email_draft: None,
            needs_approval: false,
            thread_id: None,
            steps: Vec::new(),
            approval: None,
        }
    }

    /// Derive an assistant message from a chat response.
    ///
    /// Content follows a fixed rule: a generated SQL query means the
    /// analysis succeeded, anything else means no relevant data was found.
    pub fn from_chat_response(response: ChatResponse, thread_id: &str) -> Self {
        let content = if response.sql_generated() {
            CONTENT_ANALYZED
        } else {
            CONTENT_NO_DATA
        };
        let steps = response.steps();

        let mut message = Self {
            role: MessageRole::Assistant,
            content: content.to_string(),
            sql_query: response.sql_query,
            visualization_spec: response.visualization_spec,
            email_draft: response.email_draft,
            needs_approval: response.needs_approval,
            thread_id: Some(thread_id.to_string()),
            steps,
            approval: None,
        };
        message.normalize();
        message
    }

    /// The fixed assistant message shown when the backend is unreachable.
    pub fn connection_error() -> Self {
        Self {
            role: MessageRole::Assistant,
            content: CONTENT_CONNECTION_ERROR.to_string(),
            sql_query: None,
            visualization_spec: None,
            email_draft: None,
            needs_approval: false,
            thread_id: None,
            steps: Vec::new(),
            approval: None,
        }
    }

    /// Enforce the approval invariant and initialize approval state.
    ///
    /// `needs_approval` without a non-empty `email_draft` is malformed: the
    /// approval request is dropped (with a warning) rather than rendering a
    /// card with nothing to approve. Valid approval-gated messages start in
    /// `Pending` unless a status was already assigned.
    pub fn normalize(&mut self) {
        if self.needs_approval {
            let has_draft = self.email_draft.as_deref().is_some_and(|d| !d.is_empty());
            if !has_draft {
                warn!(
                    thread_id = self.thread_id.as_deref().unwrap_or("unknown"),
                    "assistant message requires approval but carries no email draft; dropping approval gate"
                );
                self.needs_approval = false;
                self.approval = None;
                return;
            }
            if self.approval.is_none() {
                self.approval = Some(ApprovalStatus::Pending);
            }
        } else {
            self.approval = None;
        }
    }

    /// Whether this message currently awaits a user decision.
    pub fn awaiting_approval(&self) -> bool {
        matches!(self.approval, Some(status) if status.can_decide())
    }
}
