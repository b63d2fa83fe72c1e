//! `tiles` — Module to parse a raw tile-inventory specification into tiles.
//!
//! An inventory spec is a free-form string of whitespace-separated tokens.
//! Each token names one tile value with an optional repeat count, separated
//! by the *last unescaped* colon in the token:
//!
//! - `A` — one tile showing "A"
//! - `A:3` — three tiles showing "A"
//! - `\::5` — five tiles showing ":" (the first colon is escaped)
//! - `a\:b` — one tile showing "a:b" (no separator colon at all)
//!
//! A colon counts as escaped when an odd number of consecutive backslashes
//! sits immediately to its left, so `\\:` is a literal backslash followed by
//! a separator colon. After the split, both halves are unescaped: a
//! backslash followed by any character becomes that character (`\\` → `\`).
//!
//! Parsing never fails. Empty input, whitespace-only input, tokens whose
//! value unescapes to nothing, and malformed counts all degrade to fewer
//! tiles or a count of 1 — a bad count must not silently delete tiles.

/// One physical inventory unit: a displayed value plus an identity that
/// distinguishes it from other tiles showing the same value.
///
/// Two tiles of the same letter are still distinct resources; the matching
/// stage consumes each identity at most once. Identities are unique across
/// the entire parsed inventory, not just within one token's expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// The engraved value, compared case-insensitively against phrase
    /// characters.
    pub value: String,
    /// Opaque unique id, e.g. `"A#s0"`.
    pub identity: String,
}

/// Parse an inventory spec into an ordered list of tiles.
#[must_use]
pub fn parse_inventory(input: &str) -> Vec<Tile> {
    let mut tiles = Vec::new();
    let mut seq = 0usize;

    for token in input.split_whitespace() {
        let (value, count_raw) = split_token_count(token);
        if value.is_empty() {
            continue;
        }
        let count = parse_count(count_raw.as_deref());
        for _ in 0..count {
            tiles.push(Tile {
                value: value.clone(),
                identity: format!("{value}#s{seq}"),
            });
            seq += 1;
        }
    }

    tiles
}

/// Split a token into its unescaped value and the raw count half, using the
/// last unescaped colon as the separator. Returns `None` for the count when
/// the token has no separator colon.
fn split_token_count(token: &str) -> (String, Option<String>) {
    let chars: Vec<char> = token.chars().collect();
    let mut separator = None;

    for (i, &c) in chars.iter().enumerate() {
        if c != ':' {
            continue;
        }
        // count the backslashes immediately to the left
        let backslashes = chars[..i].iter().rev().take_while(|&&b| b == '\\').count();
        if backslashes % 2 == 0 {
            separator = Some(i);
        }
    }

    match separator {
        Some(i) => (
            unescape(&chars[..i]),
            Some(unescape(&chars[i + 1..])),
        ),
        None => (unescape(&chars), None),
    }
}

/// Collapse backslash escapes: a backslash followed by any character yields
/// that character alone. A trailing lone backslash is kept as-is.
fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter();
    while let Some(&c) = iter.next() {
        if c == '\\' {
            match iter.next() {
                Some(&escaped) => out.push(escaped),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse the count half of a token. Anything unparseable or non-positive
/// defaults to 1.
fn parse_count(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}
