//! Error types for the chat client.
//!
//! All failures are delivered to the application through the error and
//! disconnect callbacks rather than returned across the async boundary;
//! parse anomalies are never errors at all (the parser degrades to
//! partial data instead).

use thiserror::Error;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Failures surfaced by the connection manager.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// `connect()` was attempted before username, token, and channel were
    /// all configured.
    #[error("missing {0} in client configuration")]
    MissingConfig(&'static str),

    /// An operation that requires an open connection was attempted while
    /// disconnected.
    #[error("not connected")]
    NotConnected,

    /// The outbound path rejected a send (writer already torn down).
    #[error("send failed: {0}")]
    Send(String),

    /// WebSocket transport failure, including a malformed endpoint URL,
    /// TLS errors, and mid-connection I/O failures.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}
