//! Derivation of renderable content blocks from a message.
//!
//! Pure function from a [`Message`] to the ordered blocks the conversation
//! pane draws. No network or stateful effects; rendering decisions that
//! depend on live state (the approval status) read the message's own field.

use crate::models::{ChartSpec, Message};
use crate::state::ApprovalStatus;

/// One renderable block of a message, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock<'a> {
    /// Text bubble
    Text(&'a str),
    /// SQL code block
    Sql(&'a str),
    /// Chart block
    Chart(&'a ChartSpec),
    /// Human-in-the-loop approval card
    Approval {
        draft: &'a str,
        status: ApprovalStatus,
    },
    /// Step indicator chips
    Steps(&'a [String]),
}

/// Derive the ordered content blocks for a message.
///
/// Order is fixed: text, SQL, chart, approval card, step chips. Absent
/// fields produce no block; an empty `steps` list renders no chip row.
pub fn content_blocks(message: &Message) -> Vec<ContentBlock<'_>> {
    let mut blocks = Vec::new();

    if !message.content.is_empty() {
        blocks.push(ContentBlock::Text(&message.content));
    }
    if let Some(sql) = message.sql_query.as_deref() {
        if !sql.is_empty() {
            blocks.push(ContentBlock::Sql(sql));
        }
    }
    if let Some(spec) = &message.visualization_spec {
        blocks.push(ContentBlock::Chart(spec));
    }
    if message.needs_approval {
        if let (Some(draft), Some(status)) = (message.email_draft.as_deref(), message.approval) {
            blocks.push(ContentBlock::Approval { draft, status });
        }
    }
    if !message.steps.is_empty() {
        blocks.push(ContentBlock::Steps(&message.steps));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::ChatResponse;
    use serde_json::json;

    #[test]
    fn test_user_message_is_text_only() {
        let message = Message::user("show churn");
        let blocks = content_blocks(&message);
        assert_eq!(blocks, vec![ContentBlock::Text("show churn")]);
    }

    #[test]
    fn test_empty_content_produces_no_text_block() {
        let mut message = Message::user("");
        message.steps = vec!["SQL Generated".to_string()];
        let blocks = content_blocks(&message);
        assert!(matches!(blocks.as_slice(), [ContentBlock::Steps(_)]));
    }

    #[test]
    fn test_full_assistant_message_block_order() {
        let response: ChatResponse = serde_json::from_value(json!({
            "sql_query": "SELECT * FROM orders",
            "visualization_spec": {"type": "bar", "xKey": "m", "data": [], "series": []},
            "email_draft": "Dear customer",
            "needs_approval": true
        }))
        .unwrap();
        let message = Message::from_chat_response(response, "thread_1");
        let blocks = content_blocks(&message);

        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], ContentBlock::Text(_)));
        assert!(matches!(blocks[1], ContentBlock::Sql(_)));
        assert!(matches!(blocks[2], ContentBlock::Chart(_)));
        assert!(matches!(blocks[3], ContentBlock::Approval { .. }));
        assert!(matches!(blocks[4], ContentBlock::Steps(_)));
    }

    #[test]
    fn test_sql_only_response_has_no_chart_or_approval() {
        let message = Message::from_chat_response(
            ChatResponse {
                sql_query: Some("SELECT 1".to_string()),
                ..Default::default()
            },
            "thread_1",
        );
        let blocks = content_blocks(&message);
        assert!(blocks.iter().any(|b| matches!(b, ContentBlock::Sql(_))));
        assert!(!blocks.iter().any(|b| matches!(b, ContentBlock::Chart(_))));
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::Approval { .. })));
    }

    #[test]
    fn test_approval_card_carries_current_status() {
        let mut message = Message::from_chat_response(
            ChatResponse {
                email_draft: Some("Hi".to_string()),
                needs_approval: true,
                ..Default::default()
            },
            "thread_1",
        );
        message.approval = Some(ApprovalStatus::Sent);

        let blocks = content_blocks(&message);
        assert!(blocks.contains(&ContentBlock::Approval {
            draft: "Hi",
            status: ApprovalStatus::Sent,
        }));
    }

    #[test]
    fn test_no_structured_fields_renders_no_step_row() {
        let message = Message::from_chat_response(ChatResponse::default(), "thread_1");
        let blocks = content_blocks(&message);
        assert!(!blocks.iter().any(|b| matches!(b, ContentBlock::Steps(_))));
    }
}
