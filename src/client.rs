//! Connection manager.
//!
//! [`TwitchClient`] owns one logical chat session: one transport
//! connection, one authenticated identity, one joined channel. It drives
//! the handshake, answers server keepalive probes, runs a client-side
//! keepalive timer, and turns transport events into application
//! callbacks.
//!
//! State transitions (`Disconnected -> Connecting -> Connected ->
//! Disconnected`) are serialized under one mutex; the only parties that
//! transition state are the public entry points and the receive loop.
//! All failures are delivered through the error/disconnect callbacks,
//! never returned or thrown across the async boundary.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::caps::Capability;
use crate::command::ClientCommand;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::message::ChatMessage;
use crate::transport::{self, Outbound, TransportEvent, TransportHandle};

type ConnectHandler = dyn Fn() + Send + Sync;
type DisconnectHandler = dyn Fn(Option<ClientError>) + Send + Sync;
type MessageHandler = dyn Fn(ChatMessage) + Send + Sync;
type ErrorHandler = dyn Fn(ClientError) + Send + Sync;

/// Single-slot observer callbacks; re-registration replaces.
#[derive(Default)]
struct Handlers {
    connect: Mutex<Option<Arc<ConnectHandler>>>,
    disconnect: Mutex<Option<Arc<DisconnectHandler>>>,
    message: Mutex<Option<Arc<MessageHandler>>>,
    error: Mutex<Option<Arc<ErrorHandler>>>,
}

impl Handlers {
    fn emit_connect(&self) {
        if let Some(handler) = self.connect.lock().clone() {
            handler();
        }
    }

    fn emit_disconnect(&self, err: Option<ClientError>) {
        if let Some(handler) = self.disconnect.lock().clone() {
            handler(err);
        }
    }

    fn emit_error(&self, err: ClientError) {
        if let Some(handler) = self.error.lock().clone() {
            handler(err);
        }
    }

    fn message_handler(&self) -> Option<Arc<MessageHandler>> {
        self.message.lock().clone()
    }
}

enum ConnectionState {
    Disconnected,
    /// `connect()` is past the idempotence check but the session has not
    /// started yet.
    Connecting,
    Connected(Session),
}

struct Session {
    outbound: mpsc::UnboundedSender<Outbound>,
    shutdown: CancellationToken,
}

/// An asynchronous Twitch chat client.
///
/// See the crate docs for a usage example. All methods take `&self`;
/// the client is internally synchronized and can be shared behind an
/// [`Arc`].
pub struct TwitchClient {
    config: Mutex<ClientConfig>,
    state: Arc<Mutex<ConnectionState>>,
    handlers: Arc<Handlers>,
}

impl Default for TwitchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitchClient {
    /// Create an unconfigured client.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from a full configuration. Values are taken
    /// as-is, including endpoint and keepalive overrides.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config: Mutex::new(config),
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
            handlers: Arc::new(Handlers::default()),
        }
    }

    /// Store session credentials. Pure mutation, no I/O; values are only
    /// validated by [`connect`](Self::connect). Username and channel are
    /// lowercased the way the chat server expects them.
    pub fn configure(&self, username: &str, token: &str, channel: &str) {
        let mut config = self.config.lock();
        config.username = username.to_lowercase();
        config.token = token.to_string();
        config.channel = channel.to_lowercase();
    }

    /// Register the connect observer. Replaces any previous one.
    pub fn on_connect<F: Fn() + Send + Sync + 'static>(&self, handler: F) {
        *self.handlers.connect.lock() = Some(Arc::new(handler));
    }

    /// Register the disconnect observer. Receives `None` for a deliberate
    /// local disconnect and `Some` for a transport failure.
    pub fn on_disconnect<F: Fn(Option<ClientError>) + Send + Sync + 'static>(&self, handler: F) {
        *self.handlers.disconnect.lock() = Some(Arc::new(handler));
    }

    /// Register the chat message observer. Invoked on a separate task so
    /// a slow handler never stalls frame reception.
    pub fn on_message<F: Fn(ChatMessage) + Send + Sync + 'static>(&self, handler: F) {
        *self.handlers.message.lock() = Some(Arc::new(handler));
    }

    /// Register the error observer.
    pub fn on_error<F: Fn(ClientError) + Send + Sync + 'static>(&self, handler: F) {
        *self.handlers.error.lock() = Some(Arc::new(handler));
    }

    /// Whether the client currently holds an open session.
    pub fn is_connected(&self) -> bool {
        matches!(*self.state.lock(), ConnectionState::Connected(_))
    }

    /// Open the connection and perform the handshake.
    ///
    /// No-op when already connected. Configuration problems and transport
    /// open failures are reported through the error callback with the
    /// state left Disconnected. The IRC handshake itself is
    /// fire-and-forget: no acknowledgment is awaited, and later failures
    /// surface through the disconnect callback.
    pub async fn connect(&self) {
        {
            let mut state = self.state.lock();
            if !matches!(*state, ConnectionState::Disconnected) {
                return;
            }
            *state = ConnectionState::Connecting;
        }

        let config = self.config.lock().clone();
        if let Err(e) = config.validate() {
            *self.state.lock() = ConnectionState::Disconnected;
            self.handlers.emit_error(e);
            return;
        }

        match transport::open(&config.endpoint).await {
            Ok(handle) => self.start_session(handle, &config),
            Err(e) => {
                *self.state.lock() = ConnectionState::Disconnected;
                self.handlers.emit_error(e);
            }
        }
    }

    /// Close the connection.
    ///
    /// No-op when not connected. Cancels the keepalive timer, closes the
    /// transport with a "going away" code, and invokes the disconnect
    /// observer with no failure payload.
    pub fn disconnect(&self) {
        let session = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, ConnectionState::Disconnected) {
                ConnectionState::Connected(session) => session,
                other => {
                    *state = other;
                    return;
                }
            }
        };

        session.shutdown.cancel();
        let _ = session.outbound.send(Outbound::Close);
        debug!("disconnected locally");
        self.handlers.emit_disconnect(None);
    }

    /// Send a chat message to the configured channel.
    ///
    /// While disconnected this reports [`ClientError::NotConnected`]
    /// through the error callback and touches nothing else. The text is
    /// passed through verbatim.
    pub fn send_chat_message(&self, text: impl Into<String>) {
        let channel = self.config.lock().channel.clone();
        let line = ClientCommand::Privmsg {
            channel,
            text: text.into(),
        }
        .to_string();

        let result = {
            let state = self.state.lock();
            match &*state {
                ConnectionState::Connected(session) => session
                    .outbound
                    .send(Outbound::Line(line))
                    .map_err(|_| ClientError::Send("writer task is gone".into())),
                _ => Err(ClientError::NotConnected),
            }
        };
        if let Err(e) = result {
            self.handlers.emit_error(e);
        }
    }

    /// Start the session over an open transport: handshake, receive
    /// loop, keepalive timer, state transition, connect callback.
    fn start_session(&self, handle: TransportHandle, config: &ClientConfig) {
        let TransportHandle { outbound, inbound } = handle;
        let shutdown = CancellationToken::new();

        let handshake = [
            ClientCommand::Pass(config.token.clone()),
            ClientCommand::Nick(config.username.clone()),
            ClientCommand::Join(config.channel.clone()),
            ClientCommand::CapReq(Capability::default_request().to_vec()),
        ];
        for command in handshake {
            let _ = outbound.send(Outbound::Line(command.to_string()));
        }

        *self.state.lock() = ConnectionState::Connected(Session {
            outbound: outbound.clone(),
            shutdown: shutdown.clone(),
        });

        tokio::spawn(run_receive_loop(
            inbound,
            outbound.clone(),
            Arc::clone(&self.state),
            Arc::clone(&self.handlers),
            shutdown.clone(),
        ));
        tokio::spawn(run_keepalive(
            outbound,
            config.keepalive_interval,
            shutdown,
        ));

        self.handlers.emit_connect();
    }
}

/// Drain transport events until the connection ends or is torn down.
///
/// One frame is processed, then the next is requested; cancellation
/// guarantees an in-flight delivery is not re-armed after
/// `disconnect()`.
async fn run_receive_loop(
    mut inbound: mpsc::UnboundedReceiver<TransportEvent>,
    outbound: mpsc::UnboundedSender<Outbound>,
    state: Arc<Mutex<ConnectionState>>,
    handlers: Arc<Handlers>,
    shutdown: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return,
            event = inbound.recv() => event,
        };
        match event {
            Some(TransportEvent::Frame(frame)) => {
                let Some(text) = frame.into_text() else {
                    trace!("dropping non-UTF-8 binary frame");
                    continue;
                };
                // One frame may batch several newline-delimited lines.
                for line in text.lines().filter(|l| !l.is_empty()) {
                    handle_line(line, &outbound, &handlers);
                }
            }
            Some(TransportEvent::Closed(err)) => {
                finish_remote(&state, &handlers, err);
                return;
            }
            None => {
                finish_remote(&state, &handlers, None);
                return;
            }
        }
    }
}

fn handle_line(line: &str, outbound: &mpsc::UnboundedSender<Outbound>, handlers: &Handlers) {
    // Server keepalive probe: answer immediately, never forward.
    if line.starts_with("PING") {
        let _ = outbound.send(Outbound::Line(ClientCommand::Pong.to_string()));
        return;
    }

    let message = ChatMessage::parse(line);
    if message.command == "PRIVMSG" {
        if let Some(handler) = handlers.message_handler() {
            // Delivery happens off the receive loop so a slow observer
            // cannot delay the next frame.
            tokio::spawn(async move { handler(message) });
        }
    } else {
        trace!(command = %message.command, "discarding non-chat command");
    }
}

/// Remote-initiated teardown. A deliberate local `disconnect()` that won
/// the race leaves nothing to do here.
fn finish_remote(
    state: &Mutex<ConnectionState>,
    handlers: &Handlers,
    err: Option<ClientError>,
) {
    let ended = {
        let mut state = state.lock();
        match std::mem::replace(&mut *state, ConnectionState::Disconnected) {
            ConnectionState::Connected(session) => {
                session.shutdown.cancel();
                true
            }
            _ => false,
        }
    };
    if ended {
        debug!("connection ended remotely: {err:?}");
        handlers.emit_disconnect(err);
    }
}

/// Send a liveness probe on a fixed period until cancelled. No response
/// tracking: the server closing the transport on missed probes is the
/// failure signal, and the receive loop picks that up.
async fn run_keepalive(
    outbound: mpsc::UnboundedSender<Outbound>,
    period: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => return,
            _ = ticker.tick() => {
                if outbound.send(Outbound::Line(ClientCommand::Ping.to_string())).is_err() {
                    return;
                }
            }
        }
    }
}
