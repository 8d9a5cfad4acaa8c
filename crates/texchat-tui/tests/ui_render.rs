//! Rendering tests against ratatui's `TestBackend`.
//!
//! The view is driven through its public event API, then drawn into an
//! in-memory buffer and inspected as text.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Position};
use texchat_app::{AppEvent, ChatView, KeyInput, Member, Message};
use texchat_tui::ui;

fn draw(view: &ChatView, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(|frame| ui::render(frame, view)).expect("draw");
    terminal.backend().buffer().clone()
}

/// Buffer rows as plain strings.
fn rows(buffer: &Buffer) -> Vec<String> {
    (0..buffer.area.height)
        .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
        .collect()
}

fn contains(buffer: &Buffer, needle: &str) -> bool {
    rows(buffer).iter().any(|row| row.contains(needle))
}

/// Cursor position after drawing `view`.
fn cursor(view: &ChatView) -> Position {
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).expect("test terminal");
    terminal.draw(|frame| ui::render(frame, view)).expect("draw");
    terminal.get_cursor_position().expect("cursor")
}

fn status_text(view: &ChatView) -> String {
    ui::status_line(view).spans.iter().map(|span| span.content.as_ref()).collect()
}

fn chatting_view() -> ChatView {
    let mut view = ChatView::new("alice");
    let _ = view.handle(AppEvent::Connected { channel_id: "a1".into() });
    let _ = view.handle(AppEvent::MembersJoined(vec![
        Member::new("a1", "alice"),
        Member::new("b1", "bob"),
    ]));
    let _ = view.handle(AppEvent::MessageReceived(Message::broadcast("bob", "hi")));
    let _ = view.handle(AppEvent::MessageReceived(Message::broadcast("alice", "hi")));
    let _ = view.handle(AppEvent::MessageReceived(Message::private("alice", "bob", "yo")));
    view
}

#[test]
fn renders_members_and_messages() {
    let view = chatting_view();
    let buffer = draw(&view, 80, 16);

    assert!(contains(&buffer, "Members (2)"));
    assert!(contains(&buffer, "Online: alice"));
    assert!(contains(&buffer, "Online: bob"));
    assert!(contains(&buffer, "bob: hi"));
    assert!(contains(&buffer, "Me: hi"));
    assert!(contains(&buffer, "bob (Private): yo"));
}

#[test]
fn typing_member_shows_suffix() {
    let mut view = chatting_view();
    let _ = view.handle(AppEvent::TypingStatus { member_id: "b1".into(), is_typing: true });

    let buffer = draw(&view, 80, 16);

    assert!(contains(&buffer, "Online: bob is typing"));
    assert!(!contains(&buffer, "alice is typing"));
}

#[test]
fn disconnect_renders_members_offline() {
    let mut view = chatting_view();
    let _ = view.handle(AppEvent::Disconnected);

    let buffer = draw(&view, 80, 16);

    assert!(contains(&buffer, "Offline: bob"));
    assert!(!contains(&buffer, "Online: bob"));
}

#[test]
fn empty_thread_shows_placeholder() {
    let view = ChatView::new("alice");
    let buffer = draw(&view, 80, 16);

    assert!(contains(&buffer, "No messages yet"));
    assert!(contains(&buffer, "everyone"));
}

#[test]
fn composer_shows_draft_text() {
    let mut view = chatting_view();
    for c in "draft".chars() {
        let _ = view.handle(AppEvent::Key(KeyInput::Char(c)));
    }

    let buffer = draw(&view, 80, 16);

    assert!(contains(&buffer, "draft"));
    assert!(contains(&buffer, " Message "));
}

#[test]
fn emoji_overlay_appears_when_open() {
    let mut view = chatting_view();
    let _ = view.toggle_emoji_picker();

    let buffer = draw(&view, 80, 16);
    assert!(contains(&buffer, "Emoji (Enter to insert)"));

    let _ = view.toggle_emoji_picker();
    let buffer = draw(&view, 80, 16);
    assert!(!contains(&buffer, "Emoji (Enter to insert)"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut view = chatting_view();
    let _ = view.toggle_emoji_picker();
    let _ = draw(&view, 10, 4);
}

#[test]
fn status_line_text() {
    let mut view = ChatView::new("alice");
    insta::assert_snapshot!(status_text(&view), @" Connecting... | alice");

    let _ = view.handle(AppEvent::Connected { channel_id: "a1".into() });
    insta::assert_snapshot!(status_text(&view), @" Online | alice");

    let _ = view.handle(AppEvent::ChannelError { message: "channel not connected".into() });
    let _ = view.handle(AppEvent::Disconnected);
    insta::assert_snapshot!(status_text(&view), @" Offline | alice | Error: channel not connected");
}

#[test]
fn page_up_reaches_oldest_message() {
    let mut view = chatting_view();
    for i in 0..30 {
        let message = Message::broadcast("bob", format!("msg-{i:02}"));
        let _ = view.handle(AppEvent::MessageReceived(message));
    }

    let buffer = draw(&view, 80, 16);
    assert!(contains(&buffer, "bob: msg-29"));
    assert!(!contains(&buffer, "bob: hi"));

    for _ in 0..10 {
        let _ = view.handle(AppEvent::Key(KeyInput::PageUp));
    }
    let buffer = draw(&view, 80, 16);
    assert!(contains(&buffer, "bob: hi"));
    assert!(!contains(&buffer, "bob: msg-29"));
    assert!(contains(&buffer, "newer"));

    for _ in 0..10 {
        let _ = view.handle(AppEvent::Key(KeyInput::PageDown));
    }
    let buffer = draw(&view, 80, 16);
    assert!(contains(&buffer, "bob: msg-29"));
}

#[test]
fn cursor_counts_emoji_as_two_cells() {
    let mut with_emoji = ChatView::new("alice");
    let _ = with_emoji.handle(AppEvent::Key(KeyInput::Char('h')));
    let _ = with_emoji.handle_emoji_selection("😀");

    let mut plain = ChatView::new("alice");
    for c in "hab".chars() {
        let _ = plain.handle(AppEvent::Key(KeyInput::Char(c)));
    }

    assert_eq!(cursor(&with_emoji), cursor(&plain));
}
