//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The channel is either a
//! WebSocket connection or the in-process loopback.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use texchat_app::{AppEvent, ChannelSignal, ChatView, Driver, DriverEvent, KeyInput};
use thiserror::Error;

use crate::{
    loopback,
    transport::{self, ChannelHandle, TransportError},
    ui,
};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel task is gone.
    #[error("channel closed")]
    ChannelClosed,
}

/// Which channel the driver opens on connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelMode {
    /// In-process loopback, no server needed.
    Loopback,
    /// WebSocket connection to this URL, reconnecting after `backoff`.
    WebSocket {
        /// `ws://` or `wss://` URL.
        url: String,
        /// Delay between reconnect attempts.
        backoff: Duration,
    },
}

/// What the driver's select loop woke up for.
enum Wake {
    Terminal(Option<io::Result<Event>>),
    Channel(Option<ChannelSignal>),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the channel
/// task. Tracks connectivity from the lifecycle signals it forwards.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    channel: Option<ChannelHandle>,
    mode: ChannelMode,
    connected: bool,
}

impl TerminalDriver {
    /// Create a new terminal driver and take over the terminal.
    pub fn new(mode: ChannelMode) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, channel: None, mode, connected: false })
    }

    /// Translate a terminal event. `None` for events the view does not
    /// care about.
    fn convert_event(event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                convert_key(key).map(AppEvent::Key)
            },
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            _ => None,
        }
    }

    /// Track connectivity from a forwarded signal.
    fn observe(&mut self, signal: &ChannelSignal) {
        match signal {
            ChannelSignal::Connected { .. } => self.connected = true,
            ChannelSignal::Disconnected => self.connected = false,
            ChannelSignal::Frame(_) => {},
        }
    }
}

/// Convert a crossterm key event to a [`KeyInput`].
pub fn convert_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char(c) => Some(KeyInput::Ctrl(c.to_ascii_lowercase())),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        KeyCode::PageUp => Some(KeyInput::PageUp),
        KeyCode::PageDown => Some(KeyInput::PageDown),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        loop {
            let Self { event_stream, channel, .. } = &mut *self;

            // Both branches are cancel-safe: `StreamExt::next` and
            // `mpsc::Receiver::recv` lose nothing when dropped.
            let wake = match channel {
                Some(channel) => tokio::select! {
                    biased;
                    event = event_stream.next() => Wake::Terminal(event),
                    signal = channel.from_channel.recv() => Wake::Channel(signal),
                },
                None => Wake::Terminal(event_stream.next().await),
            };

            match wake {
                Wake::Terminal(None) => return Ok(None),
                Wake::Terminal(Some(Err(e))) => return Err(TerminalError::Io(e)),
                Wake::Terminal(Some(Ok(event))) => {
                    if let Some(event) = Self::convert_event(event) {
                        return Ok(Some(DriverEvent::Input(event)));
                    }
                },
                Wake::Channel(Some(signal)) => {
                    self.observe(&signal);
                    return Ok(Some(DriverEvent::Channel(signal)));
                },
                Wake::Channel(None) => {
                    tracing::warn!("channel task ended");
                    self.channel = None;
                    if std::mem::take(&mut self.connected) {
                        return Ok(Some(DriverEvent::Channel(ChannelSignal::Disconnected)));
                    }
                },
            }
        }
    }

    async fn send_frame(&mut self, frame: String) -> Result<(), Self::Error> {
        let channel = self.channel.as_ref().ok_or(TerminalError::ChannelClosed)?;
        channel.to_channel.send(frame).await.map_err(|_| TerminalError::ChannelClosed)
    }

    async fn connect(&mut self) -> Result<(), Self::Error> {
        let handle = match &self.mode {
            ChannelMode::Loopback => loopback::spawn(),
            ChannelMode::WebSocket { url, backoff } => transport::connect(url, *backoff)?,
        };
        self.channel = Some(handle);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected && self.channel.is_some()
    }

    fn render(&mut self, view: &ChatView) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, view);
        })?;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.stop();
        }
        self.connected = false;
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.close();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_chars_become_ctrl_input() {
        assert_eq!(
            convert_key(press(KeyCode::Char('E'), KeyModifiers::CONTROL)),
            Some(KeyInput::Ctrl('e'))
        );
        assert_eq!(convert_key(press(KeyCode::Enter, KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn plain_keys_map_directly() {
        assert_eq!(
            convert_key(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(KeyInput::Char('x'))
        );
        assert_eq!(
            convert_key(press(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('X'))
        );
        assert_eq!(convert_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(KeyInput::Esc));
        assert_eq!(
            convert_key(press(KeyCode::PageUp, KeyModifiers::NONE)),
            Some(KeyInput::PageUp)
        );
        assert_eq!(convert_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
