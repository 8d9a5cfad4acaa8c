//! Status bar
//!
//! Displays connection status, the current user and the notice, if any.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use texchat_app::{ChatView, ConnectionStatus};

/// Build the status line.
pub fn status_line(view: &ChatView) -> Line<'static> {
    let connection_status = match view.status() {
        ConnectionStatus::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionStatus::Online => Span::styled(
            "Online",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionStatus::Offline => Span::styled("Offline", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![
        Span::raw(" "),
        connection_status,
        Span::raw(format!(" | {}", view.username())),
    ];

    if let Some(notice) = view.notice() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice.to_string(), Style::default().fg(Color::LightRed)));
    }

    Line::from(spans)
}

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &ChatView, area: Rect) {
    let paragraph = Paragraph::new(status_line(view))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
