//! Owned message model types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A parsed line of Twitch chat.
///
/// Produced by [`ChatMessage::parse`]. The container fields (`tags`,
/// `params`, `emotes`, `badges`) are always present and empty when the
/// line carried nothing parseable; `command` is empty only for empty or
/// degenerate input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatMessage {
    /// The original line, kept for diagnostics.
    pub raw: String,
    /// IRCv3 message tags. Values are stored exactly as received; when a
    /// key appears twice the last occurrence wins.
    pub tags: HashMap<String, String>,
    /// Source identity (`nick!user@host` or server name), without the
    /// leading `:`. Empty when the line had no prefix.
    pub prefix: String,
    /// Protocol verb (`PRIVMSG`, `PING`, `JOIN`, ...), as received.
    pub command: String,
    /// Middle parameters, in order, excluding the trailing argument.
    pub params: Vec<String>,
    /// The trailing argument with its leading `:` stripped. Empty when
    /// the line had no trailing argument.
    pub content: String,
    /// The message author, derived from the prefix and tags.
    pub author: Author,
    /// First parameter with its leading `#` stripped, or empty.
    pub channel: String,
    /// Emote occurrences in `content`, in the order the `emotes` tag
    /// listed them (not sorted by position).
    pub emotes: Vec<Emote>,
    /// The `id` tag, or empty.
    pub id: String,
    /// The `tmi-sent-ts` tag as an instant, when present and numeric.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Identity of a message author.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    /// Nick portion of the prefix (up to the first `!`). Empty for
    /// server-originated lines.
    pub username: String,
    /// The `display-name` tag, falling back to the username.
    pub display_name: String,
    /// The `color` tag (e.g. `#0000FF`), or empty.
    pub color: String,
    /// Badge name to version, from the `badges` tag.
    pub badges: HashMap<String, String>,
}

impl Author {
    /// Whether the author carries the moderator badge.
    pub fn is_moderator(&self) -> bool {
        self.badges.contains_key("moderator")
    }

    /// Whether the author carries the subscriber badge.
    pub fn is_subscriber(&self) -> bool {
        self.badges.contains_key("subscriber")
    }

    /// Whether the author is the channel broadcaster.
    pub fn is_broadcaster(&self) -> bool {
        self.badges.contains_key("broadcaster")
    }
}

/// One emote occurrence within a message body.
///
/// Offsets are 0-based inclusive character positions into
/// [`ChatMessage::content`], taken from the wire as-is — they are not
/// validated against the actual string bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emote {
    /// Emote identifier.
    pub id: String,
    /// First character of the emote text.
    pub start_index: usize,
    /// Last character of the emote text (inclusive).
    pub end_index: usize,
}

impl Emote {
    /// URL of the emote image on the Twitch static CDN (dark theme,
    /// largest scale).
    pub fn url(&self) -> String {
        format!(
            "https://static-cdn.jtvnw.net/emoticons/v2/{}/default/dark/3.0",
            self.id
        )
    }
}
