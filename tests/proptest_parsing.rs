//! Property-based tests for the chat line parser.
//!
//! Uses proptest to generate random protocol components and verify that:
//! 1. Parsing is total — it never panics, on any input at all
//! 2. Structural fields land where the line shape puts them
//! 3. The lenient sub-parsers only ever produce well-formed entries
//!
//! Run with: `cargo test --test proptest_parsing`

use proptest::prelude::*;
use twirc::message::tags::{parse_badges, parse_emotes};
use twirc::ChatMessage;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Twitch login name: lowercase alphanumeric plus underscore.
fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_]{1,25}").expect("valid regex")
}

/// Channel name without the `#`.
fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_]{1,25}").expect("valid regex")
}

/// Message text without CR/LF (the transport strips line breaks).
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,400}").expect("valid regex")
}

/// Tag key and value without the characters that delimit the tag block.
fn tag_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9\\-]{0,30}").expect("valid regex")
}

fn tag_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9._\\-]{0,50}").expect("valid regex")
}

// =============================================================================
// TOTALITY
// =============================================================================

proptest! {
    /// The fundamental property: any string parses to a message.
    #[test]
    fn parse_never_panics(input in ".*") {
        let msg = ChatMessage::parse(&input);
        prop_assert_eq!(msg.raw, input);
    }

    /// Same input, same message.
    #[test]
    fn parse_is_deterministic(input in "[ -~]{0,200}") {
        prop_assert_eq!(ChatMessage::parse(&input), ChatMessage::parse(&input));
    }

    /// The sub-parsers never panic on arbitrary tag fragments either.
    #[test]
    fn sub_parsers_never_panic(raw in "[ -~]{0,200}") {
        let _ = parse_badges(&raw);
        let _ = parse_emotes(&raw);
    }
}

// =============================================================================
// STRUCTURAL PROPERTIES
// =============================================================================

proptest! {
    /// A well-formed chat line lands every component in its field.
    #[test]
    fn well_formed_privmsg_structure(
        user in username_strategy(),
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":{user}!{user}@{user}.tmi.twitch.tv PRIVMSG #{channel} :{text}");
        let msg = ChatMessage::parse(&line);

        prop_assert_eq!(msg.command, "PRIVMSG");
        prop_assert_eq!(msg.author.username, user);
        prop_assert_eq!(msg.channel, channel);
        prop_assert_eq!(msg.content, text);
    }

    /// Tag entries from well-formed segments always appear in the map.
    #[test]
    fn well_formed_tags_are_kept(
        key in tag_key_strategy(),
        value in tag_value_strategy(),
    ) {
        let line = format!("@{key}={value} PING");
        let msg = ChatMessage::parse(&line);

        prop_assert_eq!(msg.tags.get(&key).map(String::as_str), Some(value.as_str()));
    }

    /// Badge entries are only ever produced from exactly `name/version`
    /// pieces, so every recorded pair reassembles to a piece of the input.
    #[test]
    fn badges_only_record_well_formed_pieces(raw in "[a-z0-9/,_-]{0,80}") {
        for (name, version) in parse_badges(&raw) {
            let piece = format!("{name}/{version}");
            prop_assert!(raw.split(',').any(|p| p == piece));
        }
    }

    /// Emote occurrences always carry numeric bounds taken verbatim.
    #[test]
    fn emote_positions_round_trip(
        id in "[0-9]{1,6}",
        start in 0usize..500,
        len in 0usize..50,
    ) {
        let end = start + len;
        let emotes = parse_emotes(&format!("{id}:{start}-{end}"));
        prop_assert_eq!(emotes.len(), 1);
        prop_assert_eq!(&emotes[0].id, &id);
        prop_assert_eq!(emotes[0].start_index, start);
        prop_assert_eq!(emotes[0].end_index, end);
    }
}
