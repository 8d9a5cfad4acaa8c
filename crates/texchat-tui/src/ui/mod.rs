//! UI rendering
//!
//! Rendering functions that convert ChatView state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod composer;
mod emoji;
mod members;
mod messages;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
pub use status::status_line;
use texchat_app::ChatView;

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &ChatView) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const COMPOSER_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, composer_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, view, *main_area);
    composer::render(frame, view, *composer_area);
    status::render(frame, view, *status_area);

    if view.emoji_picker().is_open() {
        emoji::render(frame, view, frame.area());
    }
}

/// Render the main area (members sidebar + messages).
fn render_main_area(frame: &mut Frame, view: &ChatView, area: Rect) {
    const MEMBER_SIDEBAR_WIDTH: u16 = 28;
    const MESSAGES_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(MEMBER_SIDEBAR_WIDTH),
            Constraint::Min(MESSAGES_AREA_MIN_WIDTH),
        ])
        .split(area);

    let [members_area, messages_area] = chunks.as_ref() else {
        return;
    };

    members::render(frame, view, *members_area);
    messages::render(frame, view, *messages_area);
}
