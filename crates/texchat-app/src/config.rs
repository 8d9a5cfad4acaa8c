//! View configuration.

use std::time::Duration;

/// Idle time after the last keystroke before `typing(false)` is sent.
pub const DEFAULT_TYPING_IDLE: Duration = Duration::from_millis(1000);

/// How the label of a private message is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivateLabel {
    /// Show the other party: the receiver when the viewer sent it, the sender
    /// otherwise. The viewer's own private messages never show "Me".
    #[default]
    Counterpart,
    /// Show "Me" when the viewer sent it, the sender otherwise.
    SenderAsMe,
}

/// Tunables for [`crate::ChatView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Debounce before the trailing `typing(false)`.
    pub typing_idle: Duration,
    /// Private message label rule.
    pub private_label: PrivateLabel,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { typing_idle: DEFAULT_TYPING_IDLE, private_label: PrivateLabel::default() }
    }
}
