//! Twitch capability negotiation support.
//!
//! Twitch gates its message metadata (tags), extra commands, and
//! membership events behind IRCv3-style capabilities requested with
//! `CAP REQ` after the handshake.
//!
//! # Reference
//! - IRCv3 Capability Negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>
//! - Twitch chat capabilities: <https://dev.twitch.tv/docs/chat/irc/#capabilities>

/// Capabilities understood by the Twitch chat server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Message metadata tags (badges, color, emotes, ids, timestamps).
    Tags,
    /// Twitch-specific commands (CLEARCHAT, USERNOTICE, ...).
    Commands,
    /// JOIN/PART/NAMES membership events.
    Membership,
    /// Unknown/custom capability.
    Custom(String),
}

impl Capability {
    /// The capability set requested during the connection handshake.
    pub fn default_request() -> [Capability; 3] {
        [Self::Tags, Self::Commands, Self::Membership]
    }
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::Tags => "twitch.tv/tags",
            Self::Commands => "twitch.tv/commands",
            Self::Membership => "twitch.tv/membership",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "twitch.tv/tags" => Self::Tags,
            "twitch.tv/commands" => Self::Commands,
            "twitch.tv/membership" => Self::Membership,
            other => Self::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::Tags.as_ref(), "twitch.tv/tags");
        assert_eq!(Capability::Commands.as_ref(), "twitch.tv/commands");
        assert_eq!(Capability::Membership.as_ref(), "twitch.tv/membership");
    }

    #[test]
    fn test_capability_from_str_round_trip() {
        for cap in Capability::default_request() {
            assert_eq!(Capability::from(cap.as_ref()), cap);
        }
        assert_eq!(
            Capability::from("example.org/custom"),
            Capability::Custom("example.org/custom".into())
        );
    }
}
