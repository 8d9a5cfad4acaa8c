//! In-process loopback channel.
//!
//! Plays the server role for a single client using channels for frame
//! transport. No network: frames flow through mpsc channels, so the terminal
//! frontend can run without a chat server.
//!
//! The loopback answers `join` with a `joined` snapshot of everyone who has
//! joined so far, echoes `message` back as `response`, and ignores `typing`
//! (a single client has no peers to tell).

use texchat_app::{ChannelSignal, Member, Message};
use texchat_proto::{Inbound, Outbound};
use tokio::sync::mpsc;

use crate::transport::{CHANNEL_CAPACITY, ChannelHandle, new_channel_id};

/// Spawn an in-process loopback channel.
///
/// `Connected` is delivered immediately. The task runs until the handle is
/// stopped or dropped.
pub fn spawn() -> ChannelHandle {
    let (client_tx, mut channel_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (channel_tx, client_rx) = mpsc::channel::<ChannelSignal>(CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        let id = new_channel_id();
        tracing::info!(channel_id = %id, "loopback channel connected");
        if channel_tx.send(ChannelSignal::Connected { id }).await.is_err() {
            return;
        }

        let mut members: Vec<Member> = Vec::new();
        while let Some(frame) = channel_rx.recv().await {
            let Some(reply) = respond(&mut members, &frame) else {
                continue;
            };
            match reply.encode() {
                Ok(text) => {
                    if channel_tx.send(ChannelSignal::Frame(text)).await.is_err() {
                        break;
                    }
                },
                Err(e) => tracing::warn!(error = %e, "loopback encode failed"),
            }
        }
    });

    ChannelHandle::new(client_tx, client_rx, handle.abort_handle())
}

/// Server-side reaction to one client frame.
fn respond(members: &mut Vec<Member>, frame: &str) -> Option<Inbound> {
    match Outbound::decode(frame) {
        Ok(Outbound::Join { self_id, username }) => {
            members.push(Member::new(self_id, username));
            Some(Inbound::Joined(members.clone()))
        },
        Ok(Outbound::Message { username, receiver, body }) => {
            Some(Inbound::Response(Message::private(username, receiver, body)))
        },
        Ok(Outbound::Typing(_)) => None,
        Err(e) => {
            tracing::warn!(error = %e, "loopback rejected frame");
            None
        },
    }
}
