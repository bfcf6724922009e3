//! `#EXTINF` grammar
//!
//! ```text
//! #EXTINF:<duration> [key="value" ...],<title and/or key="value" ...>
//! ```
//!
//! Attributes are `word(-word)*="..."` with ASCII word characters and no
//! escaping inside the quotes. They are collected from the whole entry text,
//! before and after the separating comma, because providers place them on
//! either side. The duration is the text before the first comma. The title
//! is whatever follows the first comma once every matched attribute literal
//! has been removed.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::entry::{UNKNOWN_CHANNEL_TITLE, UNKNOWN_DURATION};
use crate::models::StringMap;

static ATTRIBUTE_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn attribute_regex() -> &'static Regex {
    ATTRIBUTE_REGEX.get_or_init(|| {
        Regex::new(r#"([A-Za-z0-9_]+(?:-[A-Za-z0-9_]+)*)="([^"]*)""#)
            .expect("attribute pattern is valid")
    })
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// One `key="value"` occurrence, as written in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch<'a> {
    /// Key as written; map keys are the lower-cased form
    pub key: &'a str,
    pub value: &'a str,
    /// The full `key="value"` text
    pub literal: &'a str,
}

/// Split entry text at its first comma
///
/// Returns the duration part and the rest. Text with no comma is all
/// duration part, with an empty rest. Quotes are not tracked, so a stray
/// `"` never hides the separator.
pub fn split_duration(body: &str) -> (&str, &str) {
    body.split_once(',').unwrap_or((body, ""))
}

/// Duration in seconds from the duration part
///
/// The whole trimmed part must be a number; anything else, including
/// attributes written before the comma, is [`UNKNOWN_DURATION`], as is a
/// non-finite value.
pub fn parse_duration(duration_part: &str) -> f64 {
    duration_part
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|duration| duration.is_finite())
        .unwrap_or(UNKNOWN_DURATION)
}

/// Every attribute occurrence in `text`, in input order
pub fn scan_attributes(text: &str) -> Vec<AttributeMatch<'_>> {
    attribute_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            Some(AttributeMatch {
                literal: caps.get(0)?.as_str(),
                key: caps.get(1)?.as_str(),
                value: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Attribute map with lower-cased keys; later duplicates overwrite earlier
pub fn collect_attributes(matches: &[AttributeMatch<'_>]) -> StringMap {
    matches
        .iter()
        .map(|m| (m.key.to_ascii_lowercase(), m.value.to_string()))
        .collect()
}

/// Remove every occurrence of each matched attribute literal
pub fn strip_attributes(text: &str, matches: &[AttributeMatch<'_>]) -> String {
    matches.iter().fold(text.to_string(), |stripped, m| {
        if stripped.contains(m.literal) {
            stripped.replace(m.literal, "")
        } else {
            stripped
        }
    })
}

/// Human title for an entry
///
/// Matched attribute literals are removed from the whole entry text first,
/// wherever they occur, even inside what reads as the channel name. The
/// title is what follows the first remaining comma.
pub fn derive_title(body: &str, matches: &[AttributeMatch<'_>]) -> String {
    let stripped = strip_attributes(body, matches);
    let (_, title_part) = split_duration(&stripped);

    let collapsed = whitespace_regex().replace_all(title_part, " ");
    let mut title = collapsed.trim();
    if let Some(rest) = title.strip_prefix(',') {
        title = rest.trim();
    }

    if title.is_empty() {
        UNKNOWN_CHANNEL_TITLE.to_string()
    } else {
        title.to_string()
    }
}
