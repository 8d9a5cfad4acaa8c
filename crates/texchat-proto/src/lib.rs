//! TeXChat wire contract
//!
//! Event names and payload shapes exchanged with the chat channel. Each frame
//! is one JSON object of the form `{"event": "<name>", "args": [...]}`, so an
//! emission with positional arguments maps onto exactly one text frame.
//!
//! # Components
//!
//! - [`Outbound`]: events the client emits (`join`, `message`, `typing`)
//! - [`Inbound`]: events the channel delivers (`response`, `joined`,
//!   `typing_status`)
//! - [`Member`], [`Message`], [`TypingSignal`]: payload records
//! - [`ProtoError`]: decode and encode failures
//!
//! Connection lifecycle (`connect`/`disconnect`) is a property of the
//! transport, not a frame, and is not modelled here.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod event;
mod payloads;

pub use errors::{ProtoError, Result};
pub use event::{Inbound, Outbound, event_names};
pub use payloads::{Member, Message, TypingSignal};
