//! Request headers and cookies carried in entry attributes
//!
//! ```text
//! http-headers="Authorization: Bearer t|X-Custom: v"
//! http-cookies="session=abc; region=eu"
//! user-agent="Player/1.0" referrer="https://portal/"
//! ```

use crate::models::StringMap;

pub const HTTP_HEADERS: &str = "http-headers";
pub const HTTP_COOKIES: &str = "http-cookies";
pub const USER_AGENT: &str = "user-agent";
pub const REFERRER: &str = "referrer";

pub const USER_AGENT_HEADER: &str = "User-Agent";
pub const REFERER_HEADER: &str = "Referer";

/// Split `raw` into trimmed key/value pairs
///
/// Segments are separated by `separator`, key from value by the first
/// `assign`. Segments without `assign` are dropped on their own; an empty
/// key is kept as written.
fn split_pairs(raw: Option<&str>, separator: char, assign: char) -> StringMap {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return StringMap::new();
    };

    raw.split(separator)
        .filter_map(|segment| segment.split_once(assign))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// `Key: Value` pairs separated by `|`
pub fn parse_headers(raw: Option<&str>) -> StringMap {
    split_pairs(raw, '|', ':')
}

/// `key=value` pairs separated by `;`
pub fn parse_cookies(raw: Option<&str>) -> StringMap {
    split_pairs(raw, ';', '=')
}

/// Headers for an entry: `http-headers`, then `user-agent` and `referrer`
/// written over any same-named header
pub fn entry_headers(attributes: &StringMap) -> StringMap {
    let mut headers = parse_headers(attributes.get(HTTP_HEADERS).map(String::as_str));
    if let Some(user_agent) = attributes.get(USER_AGENT) {
        headers.insert(USER_AGENT_HEADER.to_string(), user_agent.clone());
    }
    if let Some(referrer) = attributes.get(REFERRER) {
        headers.insert(REFERER_HEADER.to_string(), referrer.clone());
    }
    headers
}

/// Cookies for an entry from `http-cookies`
pub fn entry_cookies(attributes: &StringMap) -> StringMap {
    parse_cookies(attributes.get(HTTP_COOKIES).map(String::as_str))
}
