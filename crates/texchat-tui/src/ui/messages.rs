//! Messages pane
//!
//! Displays delivered messages in arrival order, newest at the bottom.
//! PageUp/PageDown shift the window back through older messages.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use texchat_app::ChatView;

const BORDER_SIZE: u16 = 2;

/// Render the messages pane.
pub fn render(frame: &mut Frame, view: &ChatView, area: Rect) {
    let title = match view.scroll_offset() {
        0 => " Messages ".to_string(),
        n => format!(" Messages (+{n} newer) "),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if view.messages().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        view.messages()
            .iter()
            .zip(view.message_lines())
            .map(|(message, line)| {
                let style = if message.is_private() {
                    Style::default().fg(Color::Magenta)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height).saturating_sub(view.scroll_offset());
    let visible_items: Vec<_> = items.into_iter().skip(skip).take(visible_height).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}
