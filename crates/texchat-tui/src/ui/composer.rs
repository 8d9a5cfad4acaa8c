//! Composer
//!
//! Recipient and message inputs. The focused one gets a highlighted border
//! and the cursor.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};
use texchat_app::{ChatView, Field, TextField};
use unicode_width::UnicodeWidthChar;

const RECIPIENT_WIDTH: u16 = 22;
const INPUT_LINE_OFFSET: u16 = 1; // inside the border
const RECIPIENT_PLACEHOLDER: &str = "everyone";

/// Render the composer.
pub fn render(frame: &mut Frame, view: &ChatView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(RECIPIENT_WIDTH), Constraint::Min(10)])
        .split(area);

    let [recipient_area, message_area] = chunks.as_ref() else {
        return;
    };

    let composer = view.composer();
    let recipient = Input {
        field: &composer.recipient,
        title: " To ",
        placeholder: RECIPIENT_PLACEHOLDER,
        focused: composer.focus == Field::Recipient,
    };
    let message = Input {
        field: &composer.message,
        title: " Message ",
        placeholder: "",
        focused: composer.focus == Field::Message,
    };
    recipient.render(frame, *recipient_area);
    message.render(frame, *message_area);

    if !view.emoji_picker().is_open() {
        let (field, field_area) = match composer.focus {
            Field::Recipient => (&composer.recipient, *recipient_area),
            Field::Message => (&composer.message, *message_area),
        };
        set_cursor(frame, field, field_area);
    }
}

/// One bordered input box.
struct Input<'a> {
    field: &'a TextField,
    title: &'static str,
    placeholder: &'static str,
    focused: bool,
}

impl Input<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let border =
            if self.focused { Style::default().fg(Color::Yellow) } else { Style::default() };
        let block = Block::default().borders(Borders::ALL).border_style(border).title(self.title);

        let content = if self.field.is_empty() {
            Span::styled(self.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.field.text().to_string())
        };

        frame.render_widget(Paragraph::new(content).block(block), area);
    }
}

fn set_cursor(frame: &mut Frame, field: &TextField, area: Rect) {
    let available_width = area.width.saturating_sub(INPUT_LINE_OFFSET * 2);
    let cells: usize =
        field.text().chars().take(field.cursor()).filter_map(UnicodeWidthChar::width).sum();
    let cursor_offset = u16::try_from(cells).unwrap_or(u16::MAX).min(available_width);

    let cursor_x = area.x.saturating_add(INPUT_LINE_OFFSET).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET);
    let max_x = area.x.saturating_add(area.width).saturating_sub(INPUT_LINE_OFFSET);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
