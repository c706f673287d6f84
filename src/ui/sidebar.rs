//! Session list sidebar.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::app::{App, Focus};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

/// Render the sidebar: session list plus the active thread indicator.
pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sessions;
    let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };

    let items: Vec<ListItem> = app
        .sessions
        .iter()
        .map(|session| {
            let marker = if session.thread_id == app.thread_id {
                "● "
            } else {
                "  "
            };
            let style = if session.thread_id == app.thread_id {
                Style::default().fg(COLOR_ACCENT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, session.display_title()),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Sessions ")
                .title_bottom(Line::from(Span::styled(
                    " ^N new chat ",
                    Style::default().fg(COLOR_DIM),
                ))),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused && !app.sessions.is_empty() {
        state.select(Some(app.sessions_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
