//! Emoji overlay
//!
//! Centred popup listing the palette; the highlighted entry is reversed.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use texchat_app::{ChatView, EMOJI_COLUMNS, EMOJI_PALETTE};

const CELL_WIDTH: u16 = 4;
const BORDER_SIZE: u16 = 2;

/// Render the overlay centred in `area`.
pub fn render(frame: &mut Frame, view: &ChatView, area: Rect) {
    let selected = view.emoji_picker().selected();

    let lines: Vec<Line> = EMOJI_PALETTE
        .chunks(EMOJI_COLUMNS)
        .enumerate()
        .map(|(row, entries)| {
            let spans = entries.iter().enumerate().map(|(col, emoji)| {
                let style = if row * EMOJI_COLUMNS + col == selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Span::styled(format!(" {emoji} "), style)
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect();

    let width = EMOJI_COLUMNS as u16 * CELL_WIDTH + BORDER_SIZE;
    let height = lines.len() as u16 + BORDER_SIZE;
    let popup = centered(area, width, height);

    let block = Block::default().borders(Borders::ALL).title(" Emoji (Enter to insert) ");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
