//! Session state: the conversation log, the dispatch gate, and the
//! per-message approval state machine.

pub mod approval;
pub mod conversation;
pub mod dispatch;

pub use approval::ApprovalStatus;
pub use conversation::ConversationStore;
pub use dispatch::DispatchState;
