//! Data model types shared between the API client, state, and UI.

pub mod chart;
pub mod message;
pub mod request;
pub mod session;
pub mod thread;

pub use chart::{ChartSeries, ChartSpec, ChartType};
pub use message::{Message, MessageRole};
pub use request::{ApprovalRequest, ChatRequest, ChatResponse};
pub use session::SessionSummary;
pub use thread::new_thread_id;
