//! View side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::ChatView`] state machine for the runtime to
//! execute, in order.

use std::time::Duration;

use texchat_proto::Outbound;

use crate::{Route, TimerToken};

/// Actions produced by the ChatView state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Stop the runtime without navigating (process exit).
    Quit,

    /// Emit an event on the channel (fire-and-forget).
    Emit(Outbound),

    /// Close the channel and revoke its subscriptions.
    CloseChannel,

    /// Navigate away from the chat view.
    Navigate(Route),

    /// Arm the typing-debounce timer, replacing any pending one.
    ArmTypingTimer {
        /// Token the timer reports back when it fires.
        token: TimerToken,
        /// Delay from now.
        after: Duration,
    },

    /// Cancel the pending typing-debounce timer, if any.
    CancelTypingTimer,
}
