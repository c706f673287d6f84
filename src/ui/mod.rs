//! UI rendering for the DataMind analyst client.
//!
//! Layout: a session sidebar on the left, the conversation pane in the
//! middle, and the input bar plus keybind hints at the bottom. The pure
//! message-to-blocks derivation lives in [`blocks`]; everything else is
//! presentation.

pub mod blocks;
pub mod chart;
mod conversation;
mod input;
mod sidebar;
pub mod theme;

pub use blocks::{content_blocks, ContentBlock};
pub use chart::chart_lines;
pub use conversation::message_lines;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

use conversation::render_conversation;
use input::render_input;
use sidebar::render_sidebar;
use theme::COLOR_DIM;

/// Minimum terminal width at which the sidebar is shown.
const SIDEBAR_MIN_WIDTH: u16 = 70;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 26;

/// Render the whole UI for one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let (sidebar_area, main_area) = if size.width >= SIDEBAR_MIN_WIDTH {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(size);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, size)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(main_area);

    if let Some(area) = sidebar_area {
        render_sidebar(frame, area, app);
    }
    render_conversation(frame, rows[0], app);
    render_input(frame, rows[1], app);

    let hints = Paragraph::new(Line::from(Span::styled(
        " Enter send · Tab sessions · ^N new chat · ^Y approve · ^R reject · Esc quit",
        Style::default().fg(COLOR_DIM),
    )));
    frame.render_widget(hints, rows[2]);
}
