//! # twirc
//!
//! An asynchronous client for Twitch chat (TMI), carried over a secure
//! WebSocket connection, with parsing of the IRCv3-derived message format
//! Twitch uses.
//!
//! ## Features
//!
//! - Total, panic-free parsing of chat lines into [`ChatMessage`], including
//!   IRCv3 tags, badges, and emote positions
//! - Connection lifecycle management: handshake, capability negotiation,
//!   keepalive, teardown
//! - Callback-based observer surface for connect/disconnect/message/error
//!   events
//! - Built on Tokio and `tokio-tungstenite`
//!
//! ## Quick Start
//!
//! ```no_run
//! use twirc::TwitchClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = TwitchClient::new();
//!     client.configure("mybot", "oauth:abcdef123456", "somechannel");
//!
//!     client.on_message(|msg| {
//!         println!("<{}> {}", msg.author.display_name, msg.content);
//!     });
//!     client.on_disconnect(|err| {
//!         eprintln!("disconnected: {err:?}");
//!     });
//!
//!     client.connect().await;
//! }
//! ```
//!
//! ## Parsing chat lines
//!
//! The parser is usable on its own and never fails — malformed input
//! degrades to a partial [`ChatMessage`] with empty fields:
//!
//! ```rust
//! use twirc::ChatMessage;
//!
//! let raw = "@display-name=TestUser;color=#0000FF :testuser!testuser@testuser.tmi.twitch.tv PRIVMSG #channel :hello";
//! let msg = ChatMessage::parse(raw);
//!
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.channel, "channel");
//! assert_eq!(msg.author.display_name, "TestUser");
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod caps;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod message;
mod transport;

pub use self::caps::Capability;
pub use self::client::TwitchClient;
pub use self::command::ClientCommand;
pub use self::config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_KEEPALIVE_INTERVAL};
pub use self::error::{ClientError, Result};
pub use self::message::{Author, ChatMessage, Emote};
