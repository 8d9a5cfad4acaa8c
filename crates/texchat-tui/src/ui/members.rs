//! Members sidebar
//!
//! Displays the latest member snapshot with connectivity and typing state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
};
use texchat_app::{ChatView, ConnectionStatus};

/// Render the members sidebar.
pub fn render(frame: &mut Frame, view: &ChatView, area: Rect) {
    let base = match view.status() {
        ConnectionStatus::Online => Style::default().fg(Color::Green),
        ConnectionStatus::Connecting | ConnectionStatus::Offline => {
            Style::default().fg(Color::DarkGray)
        },
    };

    let items: Vec<ListItem> = view
        .members()
        .iter()
        .zip(view.member_lines())
        .map(|(member, line)| {
            let style = if view.typing().is_typing(&member.id) {
                base.add_modifier(Modifier::ITALIC)
            } else {
                base
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(" Members ({}) ", view.members().len());
    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
