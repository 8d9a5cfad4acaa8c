//! Text of rendered list entries.
//!
//! Frontends style these lines however they like, but the text itself is
//! part of the view contract and is produced here.

use texchat_proto::{Member, Message};

use crate::{ConnectionStatus, PrivateLabel, TypingIndicators};

/// Suffix appended to a member line while that member is typing.
pub const TYPING_SUFFIX: &str = " is typing";

/// Label shown for the viewer's own broadcast messages.
pub const SELF_LABEL: &str = "Me";

/// Label part of a message line (the text before `": "`).
pub fn message_label(message: &Message, viewer: &str, rule: PrivateLabel) -> String {
    let sent_by_viewer = message.username == viewer;
    match &message.receiver {
        None if sent_by_viewer => SELF_LABEL.to_string(),
        None => message.username.clone(),
        Some(receiver) => {
            let name = match (sent_by_viewer, rule) {
                (true, PrivateLabel::Counterpart) => receiver.as_str(),
                (true, PrivateLabel::SenderAsMe) => SELF_LABEL,
                (false, _) => message.username.as_str(),
            };
            format!("{name} (Private)")
        },
    }
}

/// Full message line: `"<label>: <body>"`.
pub fn message_line(message: &Message, viewer: &str, rule: PrivateLabel) -> String {
    format!("{}: {}", message_label(message, viewer, rule), message.message)
}

/// Member line: `"<Online|Offline>: <name>"` plus the typing suffix.
///
/// The connectivity label comes from the viewer's own session status; there
/// is no per-member presence.
pub fn member_line(member: &Member, status: ConnectionStatus, typing: &TypingIndicators) -> String {
    let suffix = if typing.is_typing(&member.id) { TYPING_SUFFIX } else { "" };
    format!("{}: {}{suffix}", status.member_label(), member.receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_from_other_shows_sender() {
        let msg = Message::broadcast("bob", "hi");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::Counterpart), "bob: hi");
    }

    #[test]
    fn own_broadcast_shows_me() {
        let msg = Message::broadcast("alice", "hi");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::Counterpart), "Me: hi");
    }

    #[test]
    fn own_private_shows_receiver() {
        let msg = Message::private("alice", "bob", "yo");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::Counterpart), "bob (Private): yo");
    }

    #[test]
    fn received_private_shows_sender() {
        let msg = Message::private("bob", "alice", "yo");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::Counterpart), "bob (Private): yo");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::SenderAsMe), "bob (Private): yo");
    }

    #[test]
    fn sender_as_me_rule_labels_own_private() {
        let msg = Message::private("alice", "bob", "yo");
        assert_eq!(message_line(&msg, "alice", PrivateLabel::SenderAsMe), "Me (Private): yo");
    }

    #[test]
    fn member_line_uses_global_status_and_typing_flag() {
        let member = Member::new("1", "bob");
        let mut typing = TypingIndicators::default();
        assert_eq!(member_line(&member, ConnectionStatus::Online, &typing), "Online: bob");

        typing.set("1".into(), true);
        assert_eq!(
            member_line(&member, ConnectionStatus::Offline, &typing),
            "Offline: bob is typing"
        );
    }
}
