//! Event and message handling methods for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, warn};

use crate::models::{ChatRequest, Message};

use super::{App, AppMessage, Focus};

impl App {
    /// Dispatch the current input buffer to the backend.
    ///
    /// No-op when the text is empty/whitespace or a dispatch is already in
    /// flight. The user's message is appended before any network activity,
    /// so it is always visible regardless of the backend outcome.
    pub fn send_message(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return;
        }
        if !self.dispatch.try_begin() {
            debug!("dispatch already in flight, ignoring send");
            return;
        }

        self.input.clear();
        self.store.append(Message::user(text.clone()));
        self.scroll_offset = 0;

        let client = self.client();
        let tx = self.sender();
        let thread_id = self.thread_id.clone();
        tokio::spawn(async move {
            let request = ChatRequest {
                message: text,
                thread_id: thread_id.clone(),
            };
            let message = match client.chat(&request).await {
                Ok(response) => AppMessage::ChatCompleted {
                    thread_id,
                    response,
                },
                Err(e) => AppMessage::ChatFailed {
                    thread_id,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Load history for the active thread.
    ///
    /// Triggered at startup and on every thread switch. Failures are folded
    /// into empty-history semantics by [`App::apply`]; a new thread and a
    /// failed fetch look the same.
    pub fn load_history(&mut self) {
        self.loading_history = true;

        let client = self.client();
        let tx = self.sender();
        let thread_id = self.thread_id.clone();
        tokio::spawn(async move {
            let message = match client.history(&thread_id).await {
                Ok(messages) => AppMessage::HistoryLoaded {
                    thread_id,
                    messages,
                },
                Err(e) => AppMessage::HistoryLoadFailed {
                    thread_id,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Refresh the sidebar session list. Failures are logged and the
    /// current list is left unchanged.
    pub fn refresh_sessions(&self) {
        let client = self.client();
        let tx = self.sender();
        tokio::spawn(async move {
            match client.sessions().await {
                Ok(sessions) => {
                    let _ = tx.send(AppMessage::SessionsLoaded { sessions });
                }
                Err(e) => warn!("failed to refresh session list: {}", e),
            }
        });
    }

    /// Start a new chat: fresh thread ID, empty store, idle dispatch.
    ///
    /// The history load still fires; a brand-new thread has none, so the
    /// backend's 404 folds into the empty store it already has.
    pub fn new_chat(&mut self) {
        self.thread_id = crate::models::new_thread_id();
        self.store.clear();
        self.dispatch.finish();
        self.scroll_offset = 0;
        debug!(thread_id = %self.thread_id, "started new chat");
        self.load_history();
    }

    /// Switch to an existing session and load its history.
    pub fn select_session(&mut self, thread_id: String) {
        if thread_id == self.thread_id {
            return;
        }
        self.thread_id = thread_id;
        self.store.clear();
        self.dispatch.finish();
        self.scroll_offset = 0;
        self.load_history();
    }

    /// Decide the approval for the message at `message_index`.
    ///
    /// Optimistic local transition first, then a background confirmation
    /// call; [`App::apply`] reconciles the outcome, reverting to pending on
    /// failure for both branches.
    pub fn decide_approval(&mut self, message_index: usize, approved: bool) {
        let thread_id = self.thread_id.clone();
        let Some(message) = self.store.message_mut(message_index) else {
            return;
        };
        let Some(status) = message.approval else {
            return;
        };
        if !status.can_decide() {
            return;
        }
        message.approval = Some(status.decide(approved));

        let client = self.client();
        let tx = self.sender();
        tokio::spawn(async move {
            let success = match client.approve(&thread_id, approved).await {
                Ok(()) => true,
                Err(e) => {
                    error!("approval call failed: {}", e);
                    false
                }
            };
            let _ = tx.send(AppMessage::ApprovalResolved {
                thread_id,
                message_index,
                approved,
                success,
            });
        });
    }

    /// Decide the newest pending approval, if there is one.
    pub fn decide_latest_approval(&mut self, approved: bool) {
        if let Some(index) = self.store.latest_pending_approval() {
            self.decide_approval(index, approved);
        }
    }

    /// Apply an async result to the application state.
    ///
    /// Results tagged with a thread that is no longer active are discarded:
    /// a late-arriving response for an abandoned thread must never touch the
    /// current conversation.
    pub fn apply(&mut self, message: AppMessage) {
        match message {
            AppMessage::HistoryLoaded { thread_id, messages } => {
                if thread_id != self.thread_id {
                    debug!(%thread_id, "discarding history for inactive thread");
                    return;
                }
                self.store.replace_all(messages);
                self.loading_history = false;
                self.scroll_offset = 0;
            }
            AppMessage::HistoryLoadFailed { thread_id, error } => {
                if thread_id != self.thread_id {
                    return;
                }
                // A failed fetch is indistinguishable from a new thread.
                debug!(%thread_id, "history load failed, treating as empty: {}", error);
                self.store.replace_all(Vec::new());
                self.loading_history = false;
            }
            AppMessage::SessionsLoaded { sessions } => {
                self.sessions = sessions;
                if self.sessions_index >= self.sessions.len() {
                    self.sessions_index = self.sessions.len().saturating_sub(1);
                }
            }
            AppMessage::ChatCompleted { thread_id, response } => {
                if thread_id != self.thread_id {
                    // The gate was already reset when this thread was
                    // abandoned; touching it here would release a dispatch
                    // still in flight for the active thread.
                    debug!(%thread_id, "discarding chat response for inactive thread");
                    return;
                }
                self.dispatch.finish();
                let message = Message::from_chat_response(response, &thread_id);
                self.store.append(message);
                self.scroll_offset = 0;
            }
            AppMessage::ChatFailed { thread_id, error } => {
                if thread_id != self.thread_id {
                    return;
                }
                self.dispatch.finish();
                warn!(%thread_id, "chat dispatch failed: {}", error);
                self.store.append(Message::connection_error());
                self.scroll_offset = 0;
            }
            AppMessage::ApprovalResolved {
                thread_id,
                message_index,
                approved,
                success,
            } => {
                if thread_id != self.thread_id {
                    debug!(%thread_id, "discarding approval result for inactive thread");
                    return;
                }
                if let Some(message) = self.store.message_mut(message_index) {
                    if let Some(status) = message.approval {
                        message.approval = Some(status.resolve(approved, success));
                    }
                }
            }
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global bindings first
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                self.should_quit = true;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.new_chat();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                self.decide_latest_approval(true);
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                self.decide_latest_approval(false);
                return;
            }
            (_, KeyCode::Tab) => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Sessions,
                    Focus::Sessions => Focus::Input,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Sessions => self.handle_sessions_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.send_message(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(5),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(5),
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_sessions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.sessions_index = self.sessions_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.sessions.is_empty() {
                    self.sessions_index = (self.sessions_index + 1).min(self.sessions.len() - 1);
                }
            }
            KeyCode::Enter => {
                if let Some(session) = self.sessions.get(self.sessions_index) {
                    let thread_id = session.thread_id.clone();
                    self.select_session(thread_id);
                    self.focus = Focus::Input;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyst::AnalystClient;
    use crate::models::request::ChatResponse;
    use crate::state::ApprovalStatus;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(AnalystClient::with_base_url("http://127.0.0.1:1"), tx)
    }

    #[tokio::test]
    async fn test_empty_input_is_ignored() {
        let mut app = test_app();
        app.input = "   ".to_string();
        app.send_message();
        assert!(app.store.is_empty());
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_send_appends_user_message_before_response() {
        let mut app = test_app();
        app.input = "show churn".to_string();
        app.send_message();
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.messages()[0].content, "show churn");
        assert!(app.is_busy());
        assert!(app.input.is_empty());
    }

    #[tokio::test]
    async fn test_second_send_while_dispatching_is_rejected() {
        let mut app = test_app();
        app.input = "first".to_string();
        app.send_message();
        app.input = "second".to_string();
        app.send_message();
        // Second send is a no-op: no user message appended, input kept.
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.input, "second");
    }

    #[tokio::test]
    async fn test_chat_completed_appends_assistant_message() {
        let mut app = test_app();
        app.input = "show churn".to_string();
        app.send_message();

        app.apply(AppMessage::ChatCompleted {
            thread_id: app.thread_id.clone(),
            response: ChatResponse {
                sql_query: Some("SELECT 1".to_string()),
                ..Default::default()
            },
        });

        assert_eq!(app.store.len(), 2);
        assert!(!app.is_busy());
        assert_eq!(
            app.store.messages()[1].content,
            crate::models::message::CONTENT_ANALYZED
        );
    }

    #[tokio::test]
    async fn test_chat_failed_appends_error_message() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.send_message();

        app.apply(AppMessage::ChatFailed {
            thread_id: app.thread_id.clone(),
            error: "connection refused".to_string(),
        });

        assert_eq!(app.store.len(), 2);
        assert!(!app.is_busy());
        assert_eq!(
            app.store.messages()[1].content,
            crate::models::message::CONTENT_CONNECTION_ERROR
        );
    }

    #[tokio::test]
    async fn test_stale_chat_response_is_discarded() {
        let mut app = test_app();
        app.input = "query on old thread".to_string();
        app.send_message();
        let old_thread = app.thread_id.clone();

        app.new_chat();
        app.apply(AppMessage::ChatCompleted {
            thread_id: old_thread,
            response: ChatResponse::default(),
        });

        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_stale_chat_response_keeps_active_dispatch_gate_closed() {
        let mut app = test_app();
        app.input = "query on old thread".to_string();
        app.send_message();
        let old_thread = app.thread_id.clone();

        app.new_chat();
        app.input = "query on new thread".to_string();
        app.send_message();
        assert!(app.is_busy());

        // The abandoned thread's reply arrives while the new dispatch is
        // still in flight. It must not release the gate.
        app.apply(AppMessage::ChatCompleted {
            thread_id: old_thread.clone(),
            response: ChatResponse::default(),
        });
        assert!(app.is_busy());
        app.apply(AppMessage::ChatFailed {
            thread_id: old_thread,
            error: "connection refused".to_string(),
        });
        assert!(app.is_busy());

        // A second send for the active thread stays rejected.
        app.input = "second send".to_string();
        app.send_message();
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.input, "second send");
    }

    #[tokio::test]
    async fn test_stale_history_is_discarded() {
        let mut app = test_app();
        let old_thread = app.thread_id.clone();
        app.new_chat();

        app.apply(AppMessage::HistoryLoaded {
            thread_id: old_thread,
            messages: vec![Message::user("stale")],
        });
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_yields_empty_thread() {
        let mut app = test_app();
        app.store.append(Message::user("leftover"));
        app.loading_history = true;

        app.apply(AppMessage::HistoryLoadFailed {
            thread_id: app.thread_id.clone(),
            error: "HTTP 500".to_string(),
        });

        assert!(app.store.is_empty());
        assert!(!app.loading_history);
    }

    #[tokio::test]
    async fn test_approval_resolution_updates_status() {
        let mut app = test_app();
        app.store.append(Message::from_chat_response(
            ChatResponse {
                email_draft: Some("Hi".to_string()),
                needs_approval: true,
                ..Default::default()
            },
            &app.thread_id.clone(),
        ));

        app.decide_latest_approval(true);
        assert_eq!(
            app.store.messages()[0].approval,
            Some(ApprovalStatus::Sending)
        );

        app.apply(AppMessage::ApprovalResolved {
            thread_id: app.thread_id.clone(),
            message_index: 0,
            approved: true,
            success: true,
        });
        assert_eq!(app.store.messages()[0].approval, Some(ApprovalStatus::Sent));
    }

    #[tokio::test]
    async fn test_new_chat_resets_thread_and_store() {
        let mut app = test_app();
        let original = app.thread_id.clone();
        app.store.append(Message::user("old"));
        app.new_chat();
        assert_ne!(app.thread_id, original);
        assert!(app.store.is_empty());
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_select_same_session_is_noop() {
        let mut app = test_app();
        app.store.append(Message::user("keep me"));
        let current = app.thread_id.clone();
        app.select_session(current);
        assert_eq!(app.store.len(), 1);
        assert!(!app.loading_history);
    }
}
