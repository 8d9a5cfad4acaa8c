//! Error types for the wire contract.
//!
//! Decoding is strict about shape (argument count and JSON types) but never
//! about content: empty strings, duplicate members and unknown extra fields
//! are accepted as-is.

use thiserror::Error;

/// Result alias for wire operations.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Errors produced while encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// Frame is not a JSON envelope.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Envelope names an event this side does not understand.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// Envelope has fewer positional arguments than the event requires.
    #[error("event '{event}' is missing argument {index}")]
    MissingArgument {
        /// Event name.
        event: &'static str,
        /// Zero-based argument position.
        index: usize,
    },

    /// Positional argument has the wrong shape.
    #[error("event '{event}' argument {index} is malformed: {reason}")]
    MalformedArgument {
        /// Event name.
        event: &'static str,
        /// Zero-based argument position.
        index: usize,
        /// Decoder message.
        reason: String,
    },

    /// Serializing a frame failed.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl ProtoError {
    /// Returns true if the frame was well-formed JSON but not a valid event.
    ///
    /// Such frames usually come from a peer speaking a newer revision of the
    /// contract and are safe to skip.
    pub fn is_contract_mismatch(&self) -> bool {
        matches!(
            self,
            Self::UnknownEvent(_) | Self::MissingArgument { .. } | Self::MalformedArgument { .. }
        )
    }
}
