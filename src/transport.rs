//! WebSocket transport seam.
//!
//! The connection manager never touches the socket directly: it sees an
//! outbound line sender and an inbound event receiver. Two pump tasks
//! adapt that channel pair to the tungstenite stream, which also
//! serializes the outbound path — keepalive probes, PONG replies, and
//! caller sends all funnel through the one writer task.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// One delivered WebSocket frame.
#[derive(Debug)]
pub(crate) enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    /// Decode the frame to text. Binary frames that are not valid UTF-8
    /// yield `None` and are dropped by the caller.
    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            Frame::Text(text) => Some(text),
            Frame::Binary(bytes) => String::from_utf8(bytes).ok(),
        }
    }
}

/// Events the transport delivers to the receive loop.
#[derive(Debug)]
pub(crate) enum TransportEvent {
    Frame(Frame),
    /// The connection ended: `Some` for a failure, `None` for a clean
    /// remote close.
    Closed(Option<ClientError>),
}

/// Items accepted by the writer task.
#[derive(Debug)]
pub(crate) enum Outbound {
    Line(String),
    /// Close the socket with a "going away" code and stop writing.
    Close,
}

/// The channel pair a session runs over.
pub(crate) struct TransportHandle {
    pub(crate) outbound: mpsc::UnboundedSender<Outbound>,
    pub(crate) inbound: mpsc::UnboundedReceiver<TransportEvent>,
}

/// Open the WebSocket and spawn the reader/writer pumps.
pub(crate) async fn open(endpoint: &str) -> Result<TransportHandle> {
    let (stream, _response) = connect_async(endpoint).await?;
    let (mut sink, mut source) = stream.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let (in_tx, in_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(item) = out_rx.recv().await {
            match item {
                Outbound::Line(line) => {
                    if let Err(e) = sink.send(WsMessage::Text(line)).await {
                        warn!("websocket send failed: {e}");
                        break;
                    }
                }
                Outbound::Close => {
                    let frame = CloseFrame {
                        code: CloseCode::Away,
                        reason: "".into(),
                    };
                    if let Err(e) = sink.send(WsMessage::Close(Some(frame))).await {
                        debug!("websocket close failed: {e}");
                    }
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        loop {
            let event = match source.next().await {
                Some(Ok(WsMessage::Text(text))) => TransportEvent::Frame(Frame::Text(text)),
                Some(Ok(WsMessage::Binary(bytes))) => TransportEvent::Frame(Frame::Binary(bytes)),
                Some(Ok(WsMessage::Ping(_)))
                | Some(Ok(WsMessage::Pong(_)))
                | Some(Ok(WsMessage::Frame(_))) => continue,
                Some(Ok(WsMessage::Close(_))) | None => TransportEvent::Closed(None),
                Some(Err(e)) => TransportEvent::Closed(Some(e.into())),
            };
            let closed = matches!(event, TransportEvent::Closed(_));
            if in_tx.send(event).is_err() || closed {
                break;
            }
        }
    });

    Ok(TransportHandle {
        outbound: out_tx,
        inbound: in_rx,
    })
}
