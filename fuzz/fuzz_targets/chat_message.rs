//! Fuzz target for chat line parsing
//!
//! The parser's contract is totality: any string input must produce a
//! message without panicking. This fuzzer hammers that contract with
//! arbitrary input, including the lenient badge/emote sub-parsers.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        // Lines over the tag-block limit are unusual; keep the corpus focused
        if input.len() > 9000 {
            return;
        }

        let msg = twirc::ChatMessage::parse(input);
        assert_eq!(msg.raw, input);

        // Tag fragments fed directly to the sub-parsers must not panic either
        let _ = twirc::message::tags::parse_badges(input);
        let _ = twirc::message::tags::parse_emotes(input);
        let _ = twirc::message::tags::parse_timestamp(input);
    }
});
