//! Client-side ordering of a fetched board.
//!
//! Every function here is pure: it takes a snapshot, clones it and sorts the
//! copy. All sorts are stable, so applying the same mode twice is a no-op and
//! records that compare equal keep their store order.
//!
//! Timestamps that are missing or cannot be parsed rank as the oldest
//! possible instant.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::UnknownOrderMode;
use crate::types::{decode_listing, Message};

/// Sort strategy applied to the board before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderMode {
    #[default]
    NewestFirst,
    OldestFirst,
    AlphabeticalByAuthor,
}

impl OrderMode {
    pub const ALL: [OrderMode; 3] = [
        OrderMode::NewestFirst,
        OrderMode::OldestFirst,
        OrderMode::AlphabeticalByAuthor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderMode::NewestFirst => "newest-first",
            OrderMode::OldestFirst => "oldest-first",
            OrderMode::AlphabeticalByAuthor => "alphabetical-by-author",
        }
    }

    /// Look up a mode by its name or by the short Portuguese label used by
    /// the mobile app (`recentes`, `antigos`, `alfabetica`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "newest-first" | "recentes" => Some(OrderMode::NewestFirst),
            "oldest-first" | "antigos" => Some(OrderMode::OldestFirst),
            "alphabetical-by-author" | "alfabetica" => Some(OrderMode::AlphabeticalByAuthor),
            _ => None,
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderMode {
    type Err = UnknownOrderMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderMode::from_name(s).ok_or_else(|| UnknownOrderMode(s.to_string()))
    }
}

/// Return a newly ordered copy of `messages`.
pub fn order(messages: &[Message], mode: OrderMode) -> Vec<Message> {
    let mut sorted = messages.to_vec();
    match mode {
        OrderMode::NewestFirst => sorted.sort_by_cached_key(|m| std::cmp::Reverse(created_at(m))),
        OrderMode::OldestFirst => sorted.sort_by_cached_key(created_at),
        OrderMode::AlphabeticalByAuthor => {
            sorted.sort_by_cached_key(|m| author_key(m.author_or_empty()))
        }
    }
    sorted
}

/// Order by mode name. An unknown name returns the input order unchanged.
pub fn order_by_name(messages: &[Message], mode: &str) -> Vec<Message> {
    match OrderMode::from_name(mode) {
        Some(mode) => order(messages, mode),
        None => {
            tracing::debug!(mode, "unknown order mode, keeping store order");
            messages.to_vec()
        }
    }
}

/// Order an undecoded store payload. A payload that is not an array orders
/// to an empty board.
pub fn order_value(listing: &Value, mode: OrderMode) -> Vec<Message> {
    order(&decode_listing(listing), mode)
}

fn created_at(message: &Message) -> Option<DateTime<Utc>> {
    message.created_at.as_deref().and_then(parse_timestamp)
}

/// Parse the store's `data_criacao` text.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Accent- and case-insensitive comparison, with lowercase ranked before
/// uppercase and raw code points as the final tie-break.
pub fn compare_authors(a: &str, b: &str) -> Ordering {
    author_key(a).cmp(&author_key(b))
}

/// Sort key behind [`compare_authors`]. Comparing whole keys keeps the
/// ordering total.
fn author_key(s: &str) -> (String, Vec<u8>, String) {
    let (folded, case): (String, Vec<u8>) = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| {
            let rank = case_rank(c);
            c.to_lowercase().map(move |lower| (lower, rank))
        })
        .unzip();
    (folded, case, s.to_string())
}

// Lowercase first, uncased in between, uppercase last.
fn case_rank(c: char) -> u8 {
    if c.is_lowercase() {
        0
    } else if c.is_uppercase() {
        2
    } else {
        1
    }
}
