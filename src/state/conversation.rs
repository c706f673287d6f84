//! In-memory conversation log for the active thread.

use crate::models::Message;

/// Ordered log of messages for exactly one thread at a time.
///
/// Insertion order is conversation chronology and is never reordered.
/// Switching threads replaces the content wholesale; nothing is merged.
/// The only mutation of an existing entry is its approval status.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the log.
    ///
    /// The message is normalized first (approval invariant enforced,
    /// approval state initialized).
    pub fn append(&mut self, mut message: Message) {
        message.normalize();
        self.messages.push(message);
    }

    /// Replace the entire log with messages loaded for another thread.
    ///
    /// Fully supersedes prior content; no entries from the previous thread
    /// survive. Each incoming message is normalized.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        for message in &mut self.messages {
            message.normalize();
        }
    }

    /// Drop all messages (used when starting a new chat).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// All messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Mutable access to one message, for approval transitions.
    pub fn message_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    /// Index of the newest message still awaiting an approval decision.
    pub fn latest_pending_approval(&self) -> Option<usize> {
        self.messages
            .iter()
            .rposition(|message| message.awaiting_approval())
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
