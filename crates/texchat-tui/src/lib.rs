//! Terminal UI for TeXChat
//!
//! A thin shell over [`texchat_app::Driver`] that provides terminal-specific
//! I/O and the two channel implementations. All orchestration logic lives in
//! the generic [`texchat_app::Runtime`].
//!
//! # Components
//!
//! - [`TerminalDriver`]: crossterm input, ratatui rendering
//! - [`transport`]: WebSocket channel with reconnect
//! - [`loopback`]: in-process channel for running without a server
//! - [`ui`]: pure rendering of the chat view

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod loopback;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use terminal::{ChannelMode, TerminalDriver, TerminalError};
pub use texchat_app::{ChatView, Driver, Outcome, Runtime};
pub use transport::{ChannelHandle, TransportError};
