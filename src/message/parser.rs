//! Total, token-based line parser.
//!
//! The line scan follows the wire shape
//!
//! ```text
//! [@tags] [:prefix] <command> [params...] [:trailing]
//! ```
//!
//! split on single spaces, order-sensitive, with no collapsing of
//! consecutive spaces. Unlike a strict protocol parser this one is total:
//! any input produces a message, with fields left empty where the line
//! had nothing usable.

use std::convert::Infallible;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while, character::complete::char, combinator::opt, sequence::preceded,
    IResult,
};

use super::tags;
use super::types::{Author, ChatMessage};

type ScanResult<'a> = IResult<&'a str, &'a str>;

/// One space-delimited token; empty when the scanner sits on a space.
fn token(input: &str) -> ScanResult<'_> {
    take_while(|c| c != ' ')(input)
}

/// The tag block: `@` followed by one token.
fn tag_block(input: &str) -> ScanResult<'_> {
    preceded(char('@'), token)(input)
}

/// The prefix: `:` followed by one token.
fn prefix_block(input: &str) -> ScanResult<'_> {
    preceded(char(':'), token)(input)
}

/// Run an optional block scanner. `opt` cannot fail, so the `Err` arm is
/// unreachable and folds into "absent".
fn scan_opt<'a>(
    parser: impl FnMut(&'a str) -> ScanResult<'a>,
    input: &'a str,
) -> (&'a str, Option<&'a str>) {
    opt(parser)(input).unwrap_or((input, None))
}

/// Intermediate borrowed view of one scanned line.
struct LineParts<'a> {
    tags: Option<&'a str>,
    prefix: Option<&'a str>,
    command: &'a str,
    params: Vec<&'a str>,
    trailing: Option<&'a str>,
}

fn scan_line(line: &str) -> LineParts<'_> {
    let (rest, tags) = scan_opt(tag_block, line);
    let rest = if tags.is_some() { eat_space(rest) } else { rest };

    let (rest, prefix) = scan_opt(prefix_block, rest);
    let rest = if prefix.is_some() { eat_space(rest) } else { rest };

    let (mut rest, command) = token(rest).unwrap_or(("", rest));

    let mut params = Vec::new();
    let mut trailing = None;
    while let Some(b' ') = rest.as_bytes().first().copied() {
        rest = &rest[1..];
        if let Some(t) = rest.strip_prefix(':') {
            // Trailing argument: the remainder of the line, spaces intact.
            trailing = Some(t);
            break;
        }
        let (r, param) = token(rest).unwrap_or(("", rest));
        params.push(param);
        rest = r;
    }

    LineParts {
        tags,
        prefix,
        command,
        params,
        trailing,
    }
}

/// Consume the single token separator, when present.
fn eat_space(input: &str) -> &str {
    input.strip_prefix(' ').unwrap_or(input)
}

impl ChatMessage {
    /// Parse one protocol line.
    ///
    /// Pure, total, deterministic. Malformed input yields a best-effort
    /// partial message with empty fields rather than an error; an empty
    /// `command` marks a degenerate line.
    pub fn parse(raw: &str) -> Self {
        let parts = scan_line(raw);

        let tag_map = parts.tags.map(tags::parse_tag_block).unwrap_or_default();
        let prefix = parts.prefix.unwrap_or_default().to_string();
        let content = parts.trailing.unwrap_or_default().to_string();

        let username = prefix
            .split_once('!')
            .map(|(nick, _)| nick)
            .unwrap_or_default()
            .to_string();
        let display_name = tag_map
            .get("display-name")
            .cloned()
            .unwrap_or_else(|| username.clone());
        let color = tag_map.get("color").cloned().unwrap_or_default();
        let badges = tag_map
            .get("badges")
            .map(|raw| tags::parse_badges(raw))
            .unwrap_or_default();

        let channel = parts
            .params
            .first()
            .and_then(|p| p.strip_prefix('#'))
            .unwrap_or_default()
            .to_string();
        let emotes = tag_map
            .get("emotes")
            .map(|raw| tags::parse_emotes(raw))
            .unwrap_or_default();
        let id = tag_map.get("id").cloned().unwrap_or_default();
        let timestamp = tag_map
            .get("tmi-sent-ts")
            .and_then(|raw| tags::parse_timestamp(raw));

        ChatMessage {
            raw: raw.to_string(),
            tags: tag_map,
            prefix,
            command: parts.command.to_string(),
            params: parts.params.iter().map(|p| p.to_string()).collect(),
            content,
            author: Author {
                username,
                display_name,
                color,
                badges,
            },
            channel,
            emotes,
            id,
            timestamp,
        }
    }
}

impl FromStr for ChatMessage {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
