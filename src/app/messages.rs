//! AppMessage enum for async communication within the application.

use crate::models::{ChatResponse, Message, SessionSummary};

/// Results of async operations fed back into the update loop.
///
/// Every variant that came from a thread-scoped request carries the thread
/// ID it was issued for, so the app can discard results that arrive after
/// the user has already switched threads.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// History fetch finished for a thread
    HistoryLoaded {
        thread_id: String,
        messages: Vec<Message>,
    },
    /// History fetch failed; treated as an empty thread
    HistoryLoadFailed { thread_id: String, error: String },
    /// Session list fetched for the sidebar
    SessionsLoaded { sessions: Vec<SessionSummary> },
    /// Chat dispatch resolved with a structured reply
    ChatCompleted {
        thread_id: String,
        response: ChatResponse,
    },
    /// Chat dispatch failed (transport error or bad response body)
    ChatFailed { thread_id: String, error: String },
    /// Approval confirmation call resolved
    ApprovalResolved {
        thread_id: String,
        message_index: usize,
        approved: bool,
        success: bool,
    },
}
