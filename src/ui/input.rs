//! Input bar rendering.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

/// Render the input bar and place the cursor at the end of the buffer.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };

    let content = if app.input.is_empty() && !focused {
        Line::from(Span::styled(
            "Ask a question about your data…",
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        Line::from(Span::raw(app.input.clone()))
    };

    let title = if app.is_busy() { " Thinking… " } else { " Message " };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    frame.render_widget(paragraph, area);

    if focused {
        let cursor_x = area.x + 1 + app.input.width() as u16;
        let cursor_x = cursor_x.min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}
