//! Line classification for M3U/M3U8 text
//!
//! Lines are trimmed and blank lines are skipped. Every remaining line falls
//! into exactly one category; the prefixes are case-sensitive.

/// `#EXTM3U`, the extended-format header marker
pub const HEADER_MARKER: &str = "#EXTM3U";

/// `#EXTINF:`, the entry marker
pub const ENTRY_MARKER: &str = "#EXTINF:";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A trimmed, non-blank playlist line tagged by syntactic category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistLine<'a> {
    /// Header marker; carries the text after `#EXTM3U`
    Header(&'a str),
    /// Entry marker; carries the text after `#EXTINF:`
    Entry(&'a str),
    /// Any other `#` line (`#EXTVLCOPT`, `#EXT-X-*`, plain comments)
    Comment(&'a str),
    /// Anything else is a stream URL, absolute or relative
    Url(&'a str),
}

impl<'a> PlaylistLine<'a> {
    /// Classify one raw line; `None` for blank lines
    pub fn classify(raw: &'a str) -> Option<Self> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }

        let classified = if let Some(rest) = line.strip_prefix(HEADER_MARKER) {
            PlaylistLine::Header(rest)
        } else if let Some(rest) = line.strip_prefix(ENTRY_MARKER) {
            PlaylistLine::Entry(rest)
        } else if line.starts_with('#') {
            PlaylistLine::Comment(line)
        } else {
            PlaylistLine::Url(line)
        };
        Some(classified)
    }
}

/// Lazily classify every line of a playlist
///
/// A leading byte order mark is dropped so that a BOM-prefixed `#EXTM3U`
/// is still recognized as the header.
pub fn classify_lines(content: &str) -> impl Iterator<Item = PlaylistLine<'_>> {
    content
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(content)
        .lines()
        .filter_map(PlaylistLine::classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            PlaylistLine::classify("#EXTM3U x-tvg-url=\"u\""),
            Some(PlaylistLine::Header(" x-tvg-url=\"u\""))
        );
        assert_eq!(
            PlaylistLine::classify("  #EXTINF:-1,News  "),
            Some(PlaylistLine::Entry("-1,News"))
        );
        assert_eq!(
            PlaylistLine::classify("#EXTVLCOPT:http-user-agent=x"),
            Some(PlaylistLine::Comment("#EXTVLCOPT:http-user-agent=x"))
        );
        assert_eq!(
            PlaylistLine::classify("live/a.ts"),
            Some(PlaylistLine::Url("live/a.ts"))
        );
        assert_eq!(PlaylistLine::classify("   \t "), None);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(
            PlaylistLine::classify("#extinf:-1,News"),
            Some(PlaylistLine::Comment("#extinf:-1,News"))
        );
    }

    #[test]
    fn test_classify_lines_skips_blanks_and_bom() {
        let content = "\u{feff}#EXTM3U\r\n\r\n#EXTINF:-1,A\r\nhttps://h/a.ts\n";
        let lines: Vec<_> = classify_lines(content).collect();
        assert_eq!(
            lines,
            vec![
                PlaylistLine::Header(""),
                PlaylistLine::Entry("-1,A"),
                PlaylistLine::Url("https://h/a.ts"),
            ]
        );
    }
}
