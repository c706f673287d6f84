//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Focus`] - Which UI component has focus
//! - [`AppMessage`] - Results of async operations fed back into the loop

mod handlers;
mod messages;

pub use messages::AppMessage;

use tokio::sync::mpsc;

use crate::analyst::AnalystClient;
use crate::models::{new_thread_id, SessionSummary};
use crate::state::{ConversationStore, DispatchState};

/// Represents which UI component has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sessions,
}

/// Main application state
pub struct App {
    /// ID of the active thread
    pub thread_id: String,
    /// Ordered message log for the active thread
    pub store: ConversationStore,
    /// Chat dispatch gate (at most one in flight)
    pub dispatch: DispatchState,
    /// Whether a history load is in flight for the active thread
    pub loading_history: bool,
    /// Current input buffer
    pub input: String,
    /// Past sessions shown in the sidebar
    pub sessions: Vec<SessionSummary>,
    /// Selected index in the sessions panel
    pub sessions_index: usize,
    /// Current focus panel
    pub focus: Focus,
    /// Scroll offset in the conversation pane (lines from the bottom)
    pub scroll_offset: u16,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Backend API client
    client: AnalystClient,
    /// Channel for async results back into the update loop
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    /// Create the app with a fresh thread.
    pub fn new(client: AnalystClient, tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self {
            thread_id: new_thread_id(),
            store: ConversationStore::new(),
            dispatch: DispatchState::default(),
            loading_history: false,
            input: String::new(),
            sessions: Vec::new(),
            sessions_index: 0,
            focus: Focus::default(),
            scroll_offset: 0,
            should_quit: false,
            client,
            tx,
        }
    }

    /// The backend client handle (cloned into spawned tasks).
    pub(crate) fn client(&self) -> AnalystClient {
        self.client.clone()
    }

    /// The async-result sender (cloned into spawned tasks).
    pub(crate) fn sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.tx.clone()
    }

    /// Whether the UI should show the "thinking" affordance.
    pub fn is_busy(&self) -> bool {
        self.dispatch.is_dispatching()
    }
}
