//! WebSocket transport for the chat channel.
//!
//! Provides [`ChannelHandle`], the channel pair every channel implementation
//! hands to the driver, and [`connect`], which runs a WebSocket connection in
//! a background task. This is a thin layer that only moves text frames and
//! reports lifecycle; the wire contract stays in the bridge.
//!
//! The task reconnects after a fixed backoff until the handle is stopped.
//! Each successful connection gets a fresh random channel id, so members are
//! identified per connection only.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use texchat_app::ChannelSignal;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

/// Buffer size of the frame and signal channels.
pub const CHANNEL_CAPACITY: usize = 32;

/// Delay between reconnect attempts.
pub const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_secs(2);

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// URL is not a `ws://` or `wss://` URL.
    #[error("invalid channel url: {0}")]
    InvalidUrl(String),

    /// Connection attempt failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error on an open connection.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Handle to a running channel task.
///
/// Frames are sent and signals received via the channels, and an internal
/// task handles the actual I/O.
pub struct ChannelHandle {
    /// Send text frames to the channel.
    pub to_channel: mpsc::Sender<String>,
    /// Receive lifecycle signals and text frames from the channel.
    pub from_channel: mpsc::Receiver<ChannelSignal>,
    /// Abort handle to stop the channel task.
    abort_handle: tokio::task::AbortHandle,
}

impl ChannelHandle {
    /// Wrap the channel ends of a spawned task.
    pub(crate) fn new(
        to_channel: mpsc::Sender<String>,
        from_channel: mpsc::Receiver<ChannelSignal>,
        abort_handle: tokio::task::AbortHandle,
    ) -> Self {
        Self { to_channel, from_channel, abort_handle }
    }

    /// Stop the channel task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Fresh channel id for a new connection.
pub fn new_channel_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Start a WebSocket channel to `url`.
///
/// Returns as soon as the task is spawned; `Connected` arrives on
/// [`ChannelHandle::from_channel`] once the handshake succeeds.
pub fn connect(url: &str, backoff: Duration) -> Result<ChannelHandle, TransportError> {
    if !(url.starts_with("ws://") || url.starts_with("wss://")) {
        return Err(TransportError::InvalidUrl(url.to_string()));
    }

    let (to_channel_tx, to_channel_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (from_channel_tx, from_channel_rx) = mpsc::channel::<ChannelSignal>(CHANNEL_CAPACITY);

    let handle =
        tokio::spawn(run_channel(url.to_string(), backoff, to_channel_rx, from_channel_tx));

    Ok(ChannelHandle::new(to_channel_tx, from_channel_rx, handle.abort_handle()))
}

/// How a single connection ended.
enum Ended {
    /// Connection dropped; try again after the backoff.
    Dropped,
    /// The driver went away; stop for good.
    Finished,
}

/// Connect, pump frames, and reconnect until the driver goes away.
async fn run_channel(
    url: String,
    backoff: Duration,
    mut to_channel: mpsc::Receiver<String>,
    from_channel: mpsc::Sender<ChannelSignal>,
) {
    loop {
        match open(&url).await {
            Ok(ws) => {
                let id = new_channel_id();
                tracing::info!(%url, channel_id = %id, "channel connected");
                if from_channel.send(ChannelSignal::Connected { id }).await.is_err() {
                    return;
                }

                let ended = pump(ws, &mut to_channel, &from_channel).await;
                if from_channel.send(ChannelSignal::Disconnected).await.is_err() {
                    return;
                }
                if let Ended::Finished = ended {
                    return;
                }
            },
            Err(e) => tracing::warn!(%url, error = %e, "connect attempt failed"),
        }

        if let Ended::Finished = wait_backoff(backoff, &mut to_channel).await {
            return;
        }
    }
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn open(url: &str) -> Result<WsStream, TransportError> {
    let (ws, _response) =
        connect_async(url).await.map_err(|e| TransportError::Connection(e.to_string()))?;
    Ok(ws)
}

/// Move frames both ways until either side closes.
async fn pump(
    ws: WsStream,
    to_channel: &mut mpsc::Receiver<String>,
    from_channel: &mpsc::Sender<ChannelSignal>,
) -> Ended {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            outgoing = to_channel.recv() => {
                let Some(frame) = outgoing else {
                    let _ = sink.close().await;
                    return Ended::Finished;
                };
                if let Err(e) = sink.send(WsMessage::Text(frame.into())).await {
                    let e = TransportError::Stream(e.to_string());
                    tracing::warn!(error = %e, "send failed, dropping connection");
                    return Ended::Dropped;
                }
            }

            incoming = stream.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        let signal = ChannelSignal::Frame(text.as_str().to_owned());
                        if from_channel.send(signal).await.is_err() {
                            return Ended::Finished;
                        }
                    },
                    Some(Ok(WsMessage::Close(_))) | None => {
                        tracing::info!("channel closed by peer");
                        return Ended::Dropped;
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "receive failed, dropping connection");
                        return Ended::Dropped;
                    },
                }
            }
        }
    }
}

/// Sleep for the backoff, discarding frames sent meanwhile.
async fn wait_backoff(backoff: Duration, to_channel: &mut mpsc::Receiver<String>) -> Ended {
    let sleep = tokio::time::sleep(backoff);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return Ended::Dropped,
            outgoing = to_channel.recv() => match outgoing {
                Some(_) => tracing::debug!("dropping frame while disconnected"),
                None => return Ended::Finished,
            },
        }
    }
}
