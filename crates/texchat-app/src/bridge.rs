//! Channel-to-view translation layer.
//!
//! The [`Bridge`] sits between the [`crate::ChatView`] and the raw text
//! channel.
//!
//! # Responsibilities
//!
//! - Converts [`ChannelSignal`]s (lifecycle and text frames) into
//!   [`crate::AppEvent`]s using the wire contract from [`texchat_proto`].
//! - Encodes [`crate::AppAction::Emit`] into frames and accumulates them to
//!   be sent by the driver in the next I/O cycle.
//! - Turns malformed frames into recoverable `ChannelError` events instead of
//!   dropping them silently.

use texchat_proto::{Inbound, ProtoError};

use crate::{AppAction, AppEvent};

/// Raw notification from a channel implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSignal {
    /// Transport connected and assigned an id.
    Connected {
        /// Channel-assigned id for this connection.
        id: String,
    },
    /// Transport lost its connection.
    Disconnected,
    /// One text frame.
    Frame(String),
}

/// Bridge between the ChatView and the wire contract.
#[derive(Debug, Default)]
pub struct Bridge {
    outgoing: Vec<String>,
}

impl Bridge {
    /// Create a bridge with no pending frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a channel signal into view events.
    pub fn handle_signal(&mut self, signal: ChannelSignal) -> Vec<AppEvent> {
        match signal {
            ChannelSignal::Connected { id } => vec![AppEvent::Connected { channel_id: id }],
            ChannelSignal::Disconnected => vec![AppEvent::Disconnected],
            ChannelSignal::Frame(text) => self.handle_frame(&text),
        }
    }

    /// Decode an inbound frame.
    pub fn handle_frame(&mut self, frame: &str) -> Vec<AppEvent> {
        match Inbound::decode(frame) {
            Ok(Inbound::Response(message)) => vec![AppEvent::MessageReceived(message)],
            Ok(Inbound::Joined(members)) => vec![AppEvent::MembersJoined(members)],
            Ok(Inbound::TypingStatus { is_typing, member_id }) => {
                vec![AppEvent::TypingStatus { member_id, is_typing }]
            },
            Err(e) => {
                tracing::warn!(error = %e, contract = e.is_contract_mismatch(), "rejected frame");
                vec![channel_error(&e)]
            },
        }
    }

    /// Process a view action and return resulting view events.
    ///
    /// Only [`AppAction::Emit`] is handled here; everything else belongs to
    /// the runtime.
    pub fn process_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        let AppAction::Emit(outbound) = action else {
            return vec![];
        };

        match outbound.encode() {
            Ok(frame) => {
                tracing::trace!(event = outbound.event_name(), "frame queued");
                self.outgoing.push(frame);
                vec![]
            },
            Err(e) => {
                tracing::warn!(event = outbound.event_name(), error = %e, "encode failed");
                vec![channel_error(&e)]
            },
        }
    }

    /// Take pending outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }
}

fn channel_error(e: &ProtoError) -> AppEvent {
    AppEvent::ChannelError { message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use texchat_proto::{Member, Message, Outbound};

    use super::*;

    #[test]
    fn lifecycle_signals_map_directly() {
        let mut bridge = Bridge::new();
        assert_eq!(bridge.handle_signal(ChannelSignal::Connected { id: "abc".into() }), vec![
            AppEvent::Connected { channel_id: "abc".into() }
        ]);
        assert_eq!(bridge.handle_signal(ChannelSignal::Disconnected), vec![
            AppEvent::Disconnected
        ]);
    }

    #[test]
    fn response_frame_becomes_message() {
        let mut bridge = Bridge::new();
        let frame = r#"{"event":"response","args":[{"username":"bob","message":"hi"}]}"#;
        let events = bridge.handle_signal(ChannelSignal::Frame(frame.into()));
        assert_eq!(events, vec![AppEvent::MessageReceived(Message::broadcast("bob", "hi"))]);
    }

    #[test]
    fn joined_frame_becomes_snapshot() {
        let mut bridge = Bridge::new();
        let frame = r#"{"event":"joined","args":[[{"id":"a1","receiver":"alice"}]]}"#;
        let events = bridge.handle_frame(frame);
        assert_eq!(events, vec![AppEvent::MembersJoined(vec![Member::new("a1", "alice")])]);
    }

    #[test]
    fn typing_status_frame_keeps_argument_order() {
        let mut bridge = Bridge::new();
        let events = bridge.handle_frame(r#"{"event":"typing_status","args":[true,"b2"]}"#);
        assert_eq!(events, vec![AppEvent::TypingStatus { member_id: "b2".into(), is_typing: true }]);
    }

    #[test]
    fn malformed_frame_is_recoverable_error() {
        let mut bridge = Bridge::new();
        let events = bridge.handle_frame("not json");
        assert!(matches!(events.as_slice(), [AppEvent::ChannelError { .. }]));

        let events = bridge.handle_frame(r#"{"event":"bogus","args":[]}"#);
        assert!(matches!(events.as_slice(), [AppEvent::ChannelError { .. }]));
    }

    #[test]
    fn emit_is_buffered_until_taken() {
        let mut bridge = Bridge::new();
        let events = bridge.process_action(AppAction::Emit(Outbound::typing(true, "abc")));
        assert!(events.is_empty());

        let frames = bridge.take_outgoing();
        assert_eq!(frames, vec![r#"{"event":"typing","args":[{"isTyping":true,"memberId":"abc"}]}"#]);
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn non_emit_actions_are_ignored() {
        let mut bridge = Bridge::new();
        assert!(bridge.process_action(AppAction::Render).is_empty());
        assert!(bridge.process_action(AppAction::CloseChannel).is_empty());
        assert!(bridge.take_outgoing().is_empty());
    }
}
