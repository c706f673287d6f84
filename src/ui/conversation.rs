//! Conversation pane rendering.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::models::{Message, MessageRole};
use crate::state::ApprovalStatus;

use super::blocks::{content_blocks, ContentBlock};
use super::chart::chart_lines;
use super::theme::{
    COLOR_APPROVAL_PENDING, COLOR_APPROVAL_REJECTED, COLOR_APPROVAL_SENT, COLOR_ASSISTANT,
    COLOR_BORDER, COLOR_DIM, COLOR_SQL, COLOR_STEP, COLOR_USER,
};

/// Render one message into terminal lines.
pub fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in content_blocks(message) {
        match block {
            ContentBlock::Text(text) => {
                let (prefix, color) = match message.role {
                    MessageRole::User => ("You ▸ ", COLOR_USER),
                    MessageRole::Assistant => ("Analyst ▸ ", COLOR_ASSISTANT),
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        prefix.to_string(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ]));
            }
            ContentBlock::Sql(sql) => {
                lines.push(Line::from(Span::styled(
                    "  ┌ SQL".to_string(),
                    Style::default().fg(COLOR_DIM),
                )));
                for sql_line in sql.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  │ {}", sql_line),
                        Style::default().fg(COLOR_SQL),
                    )));
                }
            }
            ContentBlock::Chart(spec) => {
                lines.extend(chart_lines(spec));
            }
            ContentBlock::Approval { draft, status } => {
                lines.extend(approval_card_lines(draft, status));
            }
            ContentBlock::Steps(steps) => {
                let chips = steps
                    .iter()
                    .map(|s| format!("✓ {}", s))
                    .collect::<Vec<_>>()
                    .join("   ");
                lines.push(Line::from(Span::styled(
                    format!("  {}", chips),
                    Style::default().fg(COLOR_STEP),
                )));
            }
        }
    }

    lines.push(Line::raw(""));
    lines
}

/// Render the approval card for the given status.
fn approval_card_lines(draft: &str, status: ApprovalStatus) -> Vec<Line<'static>> {
    match status {
        ApprovalStatus::Sent => vec![Line::from(Span::styled(
            "  ✓ Email sent successfully.".to_string(),
            Style::default().fg(COLOR_APPROVAL_SENT),
        ))],
        ApprovalStatus::Rejected => vec![Line::from(Span::styled(
            "  ✗ Action cancelled by user.".to_string(),
            Style::default().fg(COLOR_APPROVAL_REJECTED),
        ))],
        ApprovalStatus::Pending | ApprovalStatus::Sending => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "  ┌ Human-in-the-Loop Required: Proposed Email Draft".to_string(),
                    Style::default()
                        .fg(COLOR_APPROVAL_PENDING)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            for draft_line in draft.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  │ {}", draft_line),
                    Style::default().fg(COLOR_ASSISTANT),
                )));
            }
            let footer = if status == ApprovalStatus::Sending {
                "  └ Sending…".to_string()
            } else {
                "  └ [Ctrl+Y] Approve & Send   [Ctrl+R] Reject".to_string()
            };
            lines.push(Line::from(Span::styled(
                footer,
                Style::default().fg(COLOR_APPROVAL_PENDING),
            )));
            lines
        }
    }
}

/// Render the conversation pane.
pub fn render_conversation(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.loading_history {
        vec![Line::from(Span::styled(
            "Loading session…",
            Style::default().fg(COLOR_DIM),
        ))]
    } else if app.store.is_empty() && !app.is_busy() {
        vec![
            Line::raw(""),
            Line::from(Span::styled(
                "How can I help you today?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Ask me to analyze customer churn, sales trends, or draft marketing emails.",
                Style::default().fg(COLOR_DIM),
            )),
        ]
    } else {
        let mut lines: Vec<Line> =
            app.store.messages().iter().flat_map(message_lines).collect();
        if app.is_busy() {
            lines.push(Line::from(Span::styled(
                "Analyst ▸ thinking…",
                Style::default().fg(COLOR_DIM),
            )));
        }
        lines
    };

    let inner_height = area.height.saturating_sub(2) as usize;
    let total = lines.len();
    let bottom_scroll = total.saturating_sub(inner_height) as u16;
    let scroll = bottom_scroll.saturating_sub(app.scroll_offset);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Analysis Session "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::ChatResponse;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_user_message_lines() {
        let lines = message_lines(&Message::user("show churn"));
        assert_eq!(line_text(&lines[0]), "You ▸ show churn");
    }

    #[test]
    fn test_sql_block_lines() {
        let message = Message::from_chat_response(
            ChatResponse {
                sql_query: Some("SELECT *\nFROM orders".to_string()),
                ..Default::default()
            },
            "thread_1",
        );
        let lines = message_lines(&message);
        let rendered: Vec<String> = lines.iter().map(line_text).collect();
        assert!(rendered.iter().any(|l| l.contains("┌ SQL")));
        assert!(rendered.iter().any(|l| l.contains("│ SELECT *")));
        assert!(rendered.iter().any(|l| l.contains("│ FROM orders")));
    }

    #[test]
    fn test_step_chips_on_one_line() {
        let message = Message::from_chat_response(
            ChatResponse {
                sql_query: Some("SELECT 1".to_string()),
                ..Default::default()
            },
            "thread_1",
        );
        let lines = message_lines(&message);
        let chips = lines
            .iter()
            .map(line_text)
            .find(|l| l.contains("SQL Generated"))
            .unwrap();
        assert!(chips.contains("✓ SQL Generated"));
        assert!(chips.contains("✓ Data Fetched"));
    }

    #[test]
    fn test_approval_card_pending_shows_actions() {
        let rendered: Vec<String> = approval_card_lines("Dear customer", ApprovalStatus::Pending)
            .iter()
            .map(line_text)
            .collect();
        assert!(rendered.iter().any(|l| l.contains("Human-in-the-Loop")));
        assert!(rendered.iter().any(|l| l.contains("Dear customer")));
        assert!(rendered.iter().any(|l| l.contains("Approve & Send")));
    }

    #[test]
    fn test_approval_card_sending_hides_actions() {
        let rendered: Vec<String> = approval_card_lines("Hi", ApprovalStatus::Sending)
            .iter()
            .map(line_text)
            .collect();
        assert!(rendered.iter().any(|l| l.contains("Sending…")));
        assert!(!rendered.iter().any(|l| l.contains("Approve & Send")));
    }

    #[test]
    fn test_approval_card_terminal_states() {
        let sent: Vec<String> = approval_card_lines("Hi", ApprovalStatus::Sent)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(sent, vec!["  ✓ Email sent successfully."]);

        let rejected: Vec<String> = approval_card_lines("Hi", ApprovalStatus::Rejected)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(rejected, vec!["  ✗ Action cancelled by user."]);
    }
}
