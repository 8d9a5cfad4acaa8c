//! Payload records carried inside event arguments.

use serde::{Deserialize, Deserializer, Serialize};

/// A member entry from a `joined` snapshot.
///
/// `id` is assigned by the channel per connection, so the same person gets a
/// new id after reconnecting. It is not a durable user identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Channel-assigned connection identifier.
    pub id: String,
    /// Display name.
    pub receiver: String,
}

impl Member {
    /// Create a member entry.
    pub fn new(id: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self { id: id.into(), receiver: receiver.into() }
    }
}

/// A chat message as delivered by `response`.
///
/// An absent, `null` or empty `receiver` all decode to `None`: the message is
/// a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender display name.
    pub username: String,
    /// Recipient display name for private messages.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Body text.
    pub message: String,
}

impl Message {
    /// Broadcast message visible to every member.
    pub fn broadcast(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self { username: username.into(), receiver: None, message: message.into() }
    }

    /// Private message addressed to `receiver`.
    pub fn private(
        username: impl Into<String>,
        receiver: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let receiver: String = receiver.into();
        Self {
            username: username.into(),
            receiver: (!receiver.is_empty()).then_some(receiver),
            message: message.into(),
        }
    }

    /// True if the message has a recipient.
    pub fn is_private(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Typing notification payload of the outbound `typing` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingSignal {
    /// Whether the member is typing.
    pub is_typing: bool,
    /// Channel id of the typing member.
    pub member_id: String,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
