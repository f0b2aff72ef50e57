//! Sub-parsers for the Twitch tag vocabulary.
//!
//! Every parser here is deliberately lenient: the tag set evolves, and a
//! malformed or truncated fragment must degrade to partial data rather
//! than abort the whole parse. Malformed pieces are silently dropped.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

use super::types::Emote;

/// Parse the `@`-stripped tag block (`key=value;key=value`) into a map.
///
/// A segment only contributes an entry when splitting on `=` yields
/// exactly two pieces; the last occurrence of a key wins.
pub fn parse_tag_block(block: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    for segment in block.split(';') {
        let mut pieces = segment.split('=');
        match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(key), Some(value), None) => {
                tags.insert(key.to_string(), value.to_string());
            }
            _ => trace!(segment, "dropping malformed tag segment"),
        }
    }
    tags
}

/// Parse the `badges` tag (`name1/version1,name2/version2,...`).
///
/// Pieces that do not split on `/` into exactly two parts are dropped
/// without affecting the rest.
pub fn parse_badges(raw: &str) -> HashMap<String, String> {
    let mut badges = HashMap::new();
    for piece in raw.split(',').filter(|p| !p.is_empty()) {
        let mut parts = piece.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(version), None) => {
                badges.insert(name.to_string(), version.to_string());
            }
            _ => trace!(piece, "dropping malformed badge"),
        }
    }
    badges
}

/// Parse the `emotes` tag (`id1:start-end,start-end/id2:start-end,...`).
///
/// One [`Emote`] is emitted per valid position; non-integer bounds drop
/// that position only, and a group without exactly one `:` is dropped
/// whole.
pub fn parse_emotes(raw: &str) -> Vec<Emote> {
    let mut emotes = Vec::new();
    for group in raw.split('/').filter(|g| !g.is_empty()) {
        let mut parts = group.split(':');
        let (id, positions) = match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(positions), None) => (id, positions),
            _ => {
                trace!(group, "dropping malformed emote group");
                continue;
            }
        };
        for position in positions.split(',') {
            let mut bounds = position.split('-');
            match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(start), Some(end), None) => {
                    if let (Ok(start_index), Ok(end_index)) = (start.parse(), end.parse()) {
                        emotes.push(Emote {
                            id: id.to_string(),
                            start_index,
                            end_index,
                        });
                    }
                }
                _ => trace!(position, "dropping malformed emote position"),
            }
        }
    }
    emotes
}

/// Parse the `tmi-sent-ts` tag (integer milliseconds since the epoch).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let millis: i64 = raw.parse().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_block_basic() {
        let tags = parse_tag_block("color=#0000FF;display-name=TestUser");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["color"], "#0000FF");
        assert_eq!(tags["display-name"], "TestUser");
    }

    #[test]
    fn test_tag_block_empty_value() {
        let tags = parse_tag_block("emotes=;id=abc");
        assert_eq!(tags["emotes"], "");
        assert_eq!(tags["id"], "abc");
    }

    #[test]
    fn test_tag_block_malformed_segments_dropped() {
        // No `=` at all, and a double `=`, both contribute nothing.
        let tags = parse_tag_block("novalue;a=b=c;ok=1");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["ok"], "1");
    }

    #[test]
    fn test_tag_block_last_occurrence_wins() {
        let tags = parse_tag_block("key=first;key=second");
        assert_eq!(tags["key"], "second");
    }

    #[test]
    fn test_badges_basic() {
        let badges = parse_badges("subscriber/6,premium/1");
        assert_eq!(badges.len(), 2);
        assert_eq!(badges["subscriber"], "6");
        assert_eq!(badges["premium"], "1");
    }

    #[test]
    fn test_badges_empty() {
        assert!(parse_badges("").is_empty());
    }

    #[test]
    fn test_badges_malformed_piece_dropped() {
        // "modonly" has no `/` and is dropped without affecting the rest.
        let badges = parse_badges("modonly,subscriber/6");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges["subscriber"], "6");
    }

    #[test]
    fn test_badges_too_many_parts_dropped() {
        let badges = parse_badges("a/b/c,premium/1");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges["premium"], "1");
    }

    #[test]
    fn test_emotes_basic() {
        let emotes = parse_emotes("25:0-4,12-16/1902:6-10");
        assert_eq!(emotes.len(), 3);
        assert_eq!(
            emotes[0],
            Emote {
                id: "25".into(),
                start_index: 0,
                end_index: 4
            }
        );
        assert_eq!(
            emotes[1],
            Emote {
                id: "25".into(),
                start_index: 12,
                end_index: 16
            }
        );
        assert_eq!(
            emotes[2],
            Emote {
                id: "1902".into(),
                start_index: 6,
                end_index: 10
            }
        );
    }

    #[test]
    fn test_emotes_empty() {
        assert!(parse_emotes("").is_empty());
    }

    #[test]
    fn test_emotes_non_numeric_position_dropped_individually() {
        // The malformed position goes, the valid one in the same group stays.
        let emotes = parse_emotes("25:x-4,12-16");
        assert_eq!(emotes.len(), 1);
        assert_eq!(emotes[0].start_index, 12);
        assert_eq!(emotes[0].end_index, 16);
    }

    #[test]
    fn test_emotes_group_without_positions_dropped() {
        let emotes = parse_emotes("25/1902:6-10");
        assert_eq!(emotes.len(), 1);
        assert_eq!(emotes[0].id, "1902");
    }

    #[test]
    fn test_timestamp_valid() {
        let ts = parse_timestamp("1619191991246").expect("valid millis");
        assert_eq!(ts.timestamp_millis(), 1619191991246);
    }

    #[test]
    fn test_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not-a-number").is_none());
        assert!(parse_timestamp("12.5").is_none());
    }
}
