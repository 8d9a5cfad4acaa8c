//! Event envelopes.
//!
//! Both directions share one envelope: `{"event": name, "args": [...]}`.
//! Encoding never fails for well-typed values in practice, but the
//! `serde_json` error is still surfaced rather than swallowed.
//!
//! # Invariants
//!
//! - Each variant maps to exactly one event name (enforced by exhaustive
//!   `match` in `event_name`).
//! - Decoding checks argument count and JSON types only; content is never
//!   validated, so empty names and duplicate member ids pass through.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Member, Message, ProtoError, Result, TypingSignal};

/// Event names used on the wire.
pub mod event_names {
    /// Client announces itself after connecting.
    pub const JOIN: &str = "join";
    /// Client sends a chat message.
    pub const MESSAGE: &str = "message";
    /// Client reports typing activity.
    pub const TYPING: &str = "typing";
    /// Channel delivers a chat message.
    pub const RESPONSE: &str = "response";
    /// Channel delivers a member snapshot.
    pub const JOINED: &str = "joined";
    /// Channel relays typing activity of a member.
    pub const TYPING_STATUS: &str = "typing_status";
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    args: Vec<Value>,
}

/// Events emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// `join(selfId, username)`.
    Join {
        /// Channel-assigned id of this connection.
        self_id: String,
        /// Display name from the route.
        username: String,
    },

    /// `message(username, receiver, body)`.
    ///
    /// `receiver` is the raw recipient field: empty means broadcast.
    Message {
        /// Sender display name.
        username: String,
        /// Recipient field contents.
        receiver: String,
        /// Body text.
        body: String,
    },

    /// `typing({isTyping, memberId})`.
    Typing(TypingSignal),
}

impl Outbound {
    /// Typing notification for `member_id`.
    pub fn typing(is_typing: bool, member_id: impl Into<String>) -> Self {
        Self::Typing(TypingSignal { is_typing, member_id: member_id.into() })
    }

    /// Wire name of this event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Join { .. } => event_names::JOIN,
            Self::Message { .. } => event_names::MESSAGE,
            Self::Typing(_) => event_names::TYPING,
        }
    }

    /// Encode into a text frame.
    pub fn encode(&self) -> Result<String> {
        let args = match self {
            Self::Join { self_id, username } => vec![to_value(self_id)?, to_value(username)?],
            Self::Message { username, receiver, body } => {
                vec![to_value(username)?, to_value(receiver)?, to_value(body)?]
            },
            Self::Typing(signal) => vec![to_value(signal)?],
        };
        encode_envelope(self.event_name(), args)
    }

    /// Decode a text frame sent by a client.
    ///
    /// Used by channel implementations that play the server role.
    pub fn decode(frame: &str) -> Result<Self> {
        let envelope = decode_envelope(frame)?;
        let args = envelope.args.as_slice();
        match envelope.event.as_str() {
            event_names::JOIN => Ok(Self::Join {
                self_id: arg(args, event_names::JOIN, 0)?,
                username: arg(args, event_names::JOIN, 1)?,
            }),
            event_names::MESSAGE => Ok(Self::Message {
                username: arg(args, event_names::MESSAGE, 0)?,
                receiver: optional_arg::<String>(args, event_names::MESSAGE, 1)?
                    .unwrap_or_default(),
                body: arg(args, event_names::MESSAGE, 2)?,
            }),
            event_names::TYPING => Ok(Self::Typing(arg(args, event_names::TYPING, 0)?)),
            other => Err(ProtoError::UnknownEvent(other.to_string())),
        }
    }
}

/// Events delivered by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `response(message)`.
    Response(Message),

    /// `joined(members)`: full membership snapshot.
    Joined(Vec<Member>),

    /// `typing_status(isTyping, memberId)`.
    TypingStatus {
        /// Whether the member is typing.
        is_typing: bool,
        /// Channel id of the member.
        member_id: String,
    },
}

impl Inbound {
    /// Wire name of this event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Response(_) => event_names::RESPONSE,
            Self::Joined(_) => event_names::JOINED,
            Self::TypingStatus { .. } => event_names::TYPING_STATUS,
        }
    }

    /// Encode into a text frame.
    pub fn encode(&self) -> Result<String> {
        let args = match self {
            Self::Response(message) => vec![to_value(message)?],
            Self::Joined(members) => vec![to_value(members)?],
            Self::TypingStatus { is_typing, member_id } => {
                vec![Value::Bool(*is_typing), to_value(member_id)?]
            },
        };
        encode_envelope(self.event_name(), args)
    }

    /// Decode a text frame received from the channel.
    pub fn decode(frame: &str) -> Result<Self> {
        let envelope = decode_envelope(frame)?;
        let args = envelope.args.as_slice();
        match envelope.event.as_str() {
            event_names::RESPONSE => Ok(Self::Response(arg(args, event_names::RESPONSE, 0)?)),
            event_names::JOINED => Ok(Self::Joined(arg(args, event_names::JOINED, 0)?)),
            event_names::TYPING_STATUS => Ok(Self::TypingStatus {
                is_typing: arg(args, event_names::TYPING_STATUS, 0)?,
                member_id: arg(args, event_names::TYPING_STATUS, 1)?,
            }),
            other => Err(ProtoError::UnknownEvent(other.to_string())),
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ProtoError::Encode(e.to_string()))
}

fn encode_envelope(event: &str, args: Vec<Value>) -> Result<String> {
    let envelope = Envelope { event: event.to_string(), args };
    serde_json::to_string(&envelope).map_err(|e| ProtoError::Encode(e.to_string()))
}

fn decode_envelope(frame: &str) -> Result<Envelope> {
    serde_json::from_str(frame).map_err(|e| ProtoError::InvalidFrame(e.to_string()))
}

fn arg<T: DeserializeOwned>(args: &[Value], event: &'static str, index: usize) -> Result<T> {
    optional_arg(args, event, index)?.ok_or(ProtoError::MissingArgument { event, index })
}

/// Argument that may be absent or `null`.
fn optional_arg<T: DeserializeOwned>(
    args: &[Value],
    event: &'static str,
    index: usize,
) -> Result<Option<T>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(|e| {
            ProtoError::MalformedArgument { event, index, reason: e.to_string() }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_encodes_positional_args() {
        let frame = Outbound::Join { self_id: "abc".into(), username: "alice".into() }
            .encode()
            .expect("encode");
        assert_eq!(frame, r#"{"event":"join","args":["abc","alice"]}"#);
    }

    #[test]
    fn message_keeps_empty_receiver_on_the_wire() {
        let frame = Outbound::Message {
            username: "alice".into(),
            receiver: String::new(),
            body: "hi".into(),
        }
        .encode()
        .expect("encode");
        assert_eq!(frame, r#"{"event":"message","args":["alice","","hi"]}"#);
    }

    #[test]
    fn typing_encodes_object_argument() {
        let frame = Outbound::typing(false, "abc").encode().expect("encode");
        assert_eq!(frame, r#"{"event":"typing","args":[{"isTyping":false,"memberId":"abc"}]}"#);
    }

    #[test]
    fn response_decodes_private_message() {
        let frame = r#"{"event":"response","args":[{"username":"alice","receiver":"bob","message":"yo"}]}"#;
        assert_eq!(
            Inbound::decode(frame),
            Ok(Inbound::Response(Message::private("alice", "bob", "yo")))
        );
    }

    #[test]
    fn joined_keeps_duplicates_in_order() {
        let frame = r#"{"event":"joined","args":[[{"id":"1","receiver":"a"},{"id":"1","receiver":"a"},{"id":"2","receiver":"b"}]]}"#;
        let Ok(Inbound::Joined(members)) = Inbound::decode(frame) else {
            panic!("expected joined");
        };
        assert_eq!(members.len(), 3);
        assert_eq!(members[2], Member::new("2", "b"));
    }

    #[test]
    fn typing_status_decodes_two_args() {
        let frame = r#"{"event":"typing_status","args":[true,"xyz"]}"#;
        assert_eq!(
            Inbound::decode(frame),
            Ok(Inbound::TypingStatus { is_typing: true, member_id: "xyz".into() })
        );
    }

    #[test]
    fn missing_argument_is_reported_with_position() {
        let frame = r#"{"event":"typing_status","args":[true]}"#;
        assert_eq!(
            Inbound::decode(frame),
            Err(ProtoError::MissingArgument { event: event_names::TYPING_STATUS, index: 1 })
        );
    }

    #[test]
    fn wrong_argument_type_is_malformed() {
        let frame = r#"{"event":"typing_status","args":["yes","xyz"]}"#;
        let err = Inbound::decode(frame).expect_err("should fail");
        assert!(matches!(err, ProtoError::MalformedArgument { index: 0, .. }));
        assert!(err.is_contract_mismatch());
    }

    #[test]
    fn unknown_event_is_rejected() {
        let err = Inbound::decode(r#"{"event":"kick","args":[]}"#).expect_err("should fail");
        assert_eq!(err, ProtoError::UnknownEvent("kick".into()));
    }

    #[test]
    fn non_json_is_invalid_frame() {
        let err = Inbound::decode("hello").expect_err("should fail");
        assert!(matches!(err, ProtoError::InvalidFrame(_)));
        assert!(!err.is_contract_mismatch());
    }

    #[test]
    fn outbound_message_decodes_null_receiver_as_empty() {
        let frame = r#"{"event":"message","args":["alice",null,"hi"]}"#;
        assert_eq!(
            Outbound::decode(frame),
            Ok(Outbound::Message {
                username: "alice".into(),
                receiver: String::new(),
                body: "hi".into()
            })
        );
    }
}
