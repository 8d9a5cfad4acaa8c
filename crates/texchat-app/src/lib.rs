//! Application layer for TeXChat
//!
//! Pure state machine and generic runtime for the chat view, so the same
//! orchestration code runs in the terminal frontend and in tests on a paused
//! clock.
//!
//! # Components
//!
//! - [`ChatView`]: view state machine (members, messages, composer, typing)
//! - [`Bridge`]: wire bridge (channel frames to events, emissions to frames)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop owning the typing debounce
//! - [`Route`]: identity provider (`/<username>`)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod config;
mod driver;
mod event;
mod input;
pub mod line;
mod route;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::ChatView;
pub use bridge::{Bridge, ChannelSignal};
pub use config::{DEFAULT_TYPING_IDLE, PrivateLabel, ViewConfig};
pub use driver::{Driver, DriverEvent};
pub use event::AppEvent;
pub use input::{KeyInput, TextField};
pub use route::{Route, RouteError};
pub use runtime::{Outcome, Runtime};
pub use state::{
    Composer, ConnectionStatus, EMOJI_COLUMNS, EMOJI_PALETTE, EmojiPicker, Field, TimerToken,
    TypingIndicators,
};
pub use texchat_proto::{Member, Message};
