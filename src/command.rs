//! Outbound wire commands.
//!
//! Everything the client ever writes to the transport is one of these
//! lines. `Display` produces the exact wire format; chat text is passed
//! through as-is (truncation and escaping are the server's concern).

use std::fmt;

use crate::caps::Capability;

/// Hostname Twitch's chat ingest answers keepalive probes for.
pub const TMI_HOST: &str = "tmi.twitch.tv";

/// A line the client can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `PASS <token>` — authenticate.
    Pass(String),
    /// `NICK <username>` — identify.
    Nick(String),
    /// `JOIN #<channel>` — join a channel.
    Join(String),
    /// `CAP REQ :<caps...>` — request protocol extensions.
    CapReq(Vec<Capability>),
    /// `PRIVMSG #<channel> :<text>` — send a chat message.
    Privmsg {
        /// Target channel, without the `#`.
        channel: String,
        /// Message body, sent verbatim.
        text: String,
    },
    /// `PING :tmi.twitch.tv` — client-initiated keepalive probe.
    Ping,
    /// `PONG :tmi.twitch.tv` — reply to a server keepalive probe.
    Pong,
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass(token) => write!(f, "PASS {token}"),
            Self::Nick(username) => write!(f, "NICK {username}"),
            Self::Join(channel) => write!(f, "JOIN #{channel}"),
            Self::CapReq(caps) => {
                write!(f, "CAP REQ :")?;
                for (i, cap) in caps.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{cap}")?;
                }
                Ok(())
            }
            Self::Privmsg { channel, text } => write!(f, "PRIVMSG #{channel} :{text}"),
            Self::Ping => write!(f, "PING :{TMI_HOST}"),
            Self::Pong => write!(f, "PONG :{TMI_HOST}"),
        }
    }
}
