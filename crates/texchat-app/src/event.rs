//! View input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::ChatView`] state machine.
//!
//! Events originate from three sources:
//! - User interactions (keyboard, resize).
//! - Channel notifications translated by the [`crate::Bridge`].
//! - The runtime's typing-debounce timer.

use texchat_proto::{Member, Message};

use crate::{KeyInput, TimerToken};

/// Events processed by the ChatView state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Channel connected (`connect`).
    Connected {
        /// Channel-assigned id for this connection.
        channel_id: String,
    },

    /// Channel disconnected (`disconnect`).
    Disconnected,

    /// Message delivered (`response`).
    MessageReceived(Message),

    /// Member snapshot delivered (`joined`).
    MembersJoined(Vec<Member>),

    /// Typing activity of a member (`typing_status`).
    TypingStatus {
        /// Channel id of the member.
        member_id: String,
        /// Whether the member is typing.
        is_typing: bool,
    },

    /// Typing-debounce timer fired.
    TypingTimerElapsed {
        /// Token the timer was armed with.
        token: TimerToken,
    },

    /// Recoverable channel failure (bad frame, failed send).
    ChannelError {
        /// Error description.
        message: String,
    },
}
