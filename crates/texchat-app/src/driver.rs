//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the chat runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration, including the typing-debounce timer.

use std::future::Future;

use crate::{AppEvent, ChannelSignal, ChatView};

/// Input delivered by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// User or terminal input, fed straight to the view.
    Input(AppEvent),
    /// Channel notification, translated by the [`crate::Bridge`] first.
    Channel(ChannelSignal),
}

/// Abstracts I/O operations for the chat runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic, so the same
/// orchestration runs against a terminal, an in-process channel, or a
/// scripted test driver.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, WebSocket or loopback channel
/// - **Tests**: scripted events on tokio's paused clock
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input or channel event.
    ///
    /// Returns `None` once no further events will ever arrive. Must be
    /// cancel-safe: the runtime races it against the typing deadline and
    /// drops the future when the deadline wins.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<DriverEvent>, Self::Error>> + Send;

    /// Send a text frame on the channel (fire-and-forget).
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is closed or the send fails.
    fn send_frame(&mut self, frame: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Open the channel. Lifecycle is reported later through
    /// [`ChannelSignal::Connected`] and [`ChannelSignal::Disconnected`].
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be started.
    fn connect(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Check if the channel is currently connected.
    fn is_connected(&self) -> bool;

    /// Render the view state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &ChatView) -> Result<(), Self::Error>;

    /// Close the channel and stop delivering its signals. Idempotent.
    fn close(&mut self);
}
