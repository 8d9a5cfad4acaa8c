//! Observable view state types.
//!
//! These structures are the "View Model" of the chat: the subset of channel
//! state needed to render members, messages and the composer.

use std::collections::HashMap;

use texchat_proto::Member;

use crate::TextField;

/// Session connection status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No `connect` seen yet.
    #[default]
    Connecting,
    /// Channel is connected.
    Online,
    /// Channel reported `disconnect`.
    Offline,
}

impl ConnectionStatus {
    /// Label used in the member list.
    ///
    /// Anything other than online renders as offline.
    pub fn member_label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Connecting | Self::Offline => "Offline",
        }
    }
}

/// Composer field receiving keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    /// Recipient name (empty sends a broadcast).
    Recipient,
    /// Message body.
    #[default]
    Message,
}

/// Draft composer state.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    /// Recipient field.
    pub recipient: TextField,
    /// Message field.
    pub message: TextField,
    /// Field with keyboard focus.
    pub focus: Field,
}

impl Composer {
    /// Move focus to the other field.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Recipient => Field::Message,
            Field::Message => Field::Recipient,
        };
    }

    /// Field with keyboard focus.
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            Field::Recipient => &mut self.recipient,
            Field::Message => &mut self.message,
        }
    }
}

/// Identifier of an armed typing-debounce timer.
///
/// Every re-arm produces a fresh token so a firing that raced with a re-arm
/// or cancel can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub u64);

/// Typing flags keyed by member id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingIndicators {
    flags: HashMap<String, bool>,
}

impl TypingIndicators {
    /// Record the typing flag for a member.
    pub fn set(&mut self, member_id: String, is_typing: bool) {
        self.flags.insert(member_id, is_typing);
    }

    /// Whether the member is currently typing. Unknown members are not.
    pub fn is_typing(&self, member_id: &str) -> bool {
        self.flags.get(member_id).copied().unwrap_or(false)
    }

    /// Drop flags of members not in `members`.
    pub fn retain_members(&mut self, members: &[Member]) {
        self.flags.retain(|id, _| members.iter().any(|member| &member.id == id));
    }

    /// Number of members with a recorded flag.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True if no flags are recorded.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Characters offered by the emoji overlay.
///
/// Every entry is a single `char` so one Backspace removes it.
pub const EMOJI_PALETTE: &[&str] = &[
    "😀", "😂", "😊", "😍", "😎", "😢", "😡", "👍", "👎", "👋", "🙏", "🎉", "🔥", "💖", "✨",
    "🤔",
];

/// Palette entries per overlay row.
pub const EMOJI_COLUMNS: usize = 8;

/// Emoji overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiPicker {
    open: bool,
    selected: usize,
}

impl EmojiPicker {
    /// Whether the overlay is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip visibility.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Index of the highlighted palette entry.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Highlighted palette entry.
    pub fn current(&self) -> &'static str {
        EMOJI_PALETTE.get(self.selected).copied().unwrap_or_default()
    }

    /// Move the highlight by `delta`, wrapping around the palette.
    pub fn move_by(&mut self, delta: isize) {
        let len = EMOJI_PALETTE.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_member_is_not_typing() {
        let mut typing = TypingIndicators::default();
        assert!(!typing.is_typing("x"));
        typing.set("x".into(), true);
        assert!(typing.is_typing("x"));
        typing.set("x".into(), false);
        assert!(!typing.is_typing("x"));
        assert_eq!(typing.len(), 1);
    }

    #[test]
    fn retain_drops_departed_members() {
        let mut typing = TypingIndicators::default();
        typing.set("old".into(), true);
        typing.set("kept".into(), true);

        typing.retain_members(&[Member::new("kept", "bob"), Member::new("new", "carol")]);

        assert_eq!(typing.len(), 1);
        assert!(typing.is_typing("kept"));
        assert!(!typing.is_typing("old"));
    }

    #[test]
    fn palette_entries_are_single_chars() {
        for emoji in EMOJI_PALETTE {
            assert_eq!(emoji.chars().count(), 1, "{emoji:?}");
        }
    }

    #[test]
    fn picker_wraps_both_ways() {
        let mut picker = EmojiPicker::default();
        picker.move_by(-1);
        assert_eq!(picker.selected(), EMOJI_PALETTE.len() - 1);
        picker.move_by(1);
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn connecting_renders_as_offline() {
        assert_eq!(ConnectionStatus::Connecting.member_label(), "Offline");
        assert_eq!(ConnectionStatus::Online.member_label(), "Online");
    }
}
