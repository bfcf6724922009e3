use tracing::{debug, trace};
use uuid::Uuid;

use super::extinf::{
    collect_attributes, derive_title, parse_duration, scan_attributes, split_duration,
};
use super::http_attributes::{entry_cookies, entry_headers, REFERRER, USER_AGENT};
use super::lines::{classify_lines, PlaylistLine};
use super::{channel_mapper, PlaylistIngestor};
use crate::drm::resolver::resolve_drm_config;
use crate::models::*;
use crate::utils::url::UrlUtils;

pub const TVG_ID: &str = "tvg-id";
pub const TVG_NAME: &str = "tvg-name";
pub const TVG_LOGO: &str = "tvg-logo";
pub const TVG_COUNTRY: &str = "tvg-country";
pub const TVG_LANGUAGE: &str = "tvg-language";
pub const GROUP_TITLE: &str = "group-title";
pub const RADIO: &str = "radio";
pub const CODEC: &str = "codec";
pub const RESOLUTION: &str = "resolution";

/// Stateless M3U/M3U8 parser
///
/// Parsing never fails: malformed pieces fall back to defaults and the
/// parser moves on to the next line.
#[derive(Debug, Clone, Copy, Default)]
pub struct M3uParser;

impl M3uParser {
    pub fn new() -> Self {
        Self
    }

    /// Build a pending entry from the text after `#EXTINF:`
    pub fn parse_entry(&self, body: &str) -> ParsedEntry {
        let (duration_part, _) = split_duration(body);
        let matches = scan_attributes(body);
        let attributes = collect_attributes(&matches);
        let title = derive_title(body, &matches);

        let attribute = |key: &str| attributes.get(key).cloned();
        ParsedEntry {
            duration: parse_duration(duration_part),
            title,
            url: String::new(),
            logo_url: attribute(TVG_LOGO),
            group_title: attribute(GROUP_TITLE),
            language: attribute(TVG_LANGUAGE),
            country: attribute(TVG_COUNTRY),
            id: attribute(TVG_ID),
            epg_id: attribute(TVG_ID),
            tvg_name: attribute(TVG_NAME),
            resolution: attribute(RESOLUTION),
            codec: attribute(CODEC),
            user_agent: attribute(USER_AGENT),
            referrer: attribute(REFERRER),
            is_radio: attributes
                .get(RADIO)
                .is_some_and(|radio| radio.eq_ignore_ascii_case("true")),
            headers: entry_headers(&attributes),
            cookies: entry_cookies(&attributes),
            drm_config: resolve_drm_config(&attributes),
            attributes,
        }
    }

    /// Parse a whole playlist, keeping the `#EXTM3U` header attributes
    pub fn parse_playlist(&self, content: &str, base_url: Option<&str>) -> ParsedPlaylist {
        let accumulator = classify_lines(content).fold(ParseAccumulator::default(), |acc, line| {
            acc.step(self, line, base_url)
        });
        accumulator.finish()
    }

    /// Parse a playlist into its entries, in input order
    pub fn parse(&self, content: &str, base_url: Option<&str>) -> Vec<ParsedEntry> {
        self.parse_playlist(content, base_url).entries
    }

    /// Map entries 1:1 onto channels of `playlist_id`
    pub fn to_channels(&self, entries: Vec<ParsedEntry>, playlist_id: Uuid) -> Vec<Channel> {
        channel_mapper::to_channels(entries, playlist_id)
    }
}

impl PlaylistIngestor for M3uParser {
    fn parse_playlist(&self, content: &str, base_url: Option<&str>) -> ParsedPlaylist {
        M3uParser::parse_playlist(self, content, base_url)
    }
}

/// Parser position between lines
#[derive(Debug, Clone)]
enum ParseState {
    /// Nothing seen yet
    Start,
    /// An `#EXTINF` line is waiting for its URL line
    AwaitingUrl(Box<ParsedEntry>),
    /// Between entries
    Idle,
}

#[derive(Debug, Clone, Copy, Default)]
struct ParseStats {
    lines: usize,
    comments: usize,
    bare_entries: usize,
    discarded_entries: usize,
    ignored_urls: usize,
}

/// Everything the line fold carries from one line to the next
#[derive(Debug)]
struct ParseAccumulator {
    state: ParseState,
    header: Option<PlaylistHeader>,
    entries: Vec<ParsedEntry>,
    stats: ParseStats,
}

impl Default for ParseAccumulator {
    fn default() -> Self {
        Self {
            state: ParseState::Start,
            header: None,
            entries: Vec::new(),
            stats: ParseStats::default(),
        }
    }
}

impl ParseAccumulator {
    fn step(mut self, parser: &M3uParser, line: PlaylistLine<'_>, base_url: Option<&str>) -> Self {
        self.stats.lines += 1;
        match line {
            PlaylistLine::Header(rest) => {
                self.merge_header(rest);
                if matches!(self.state, ParseState::Start) {
                    self.state = ParseState::Idle;
                }
            }
            PlaylistLine::Entry(body) => {
                if let ParseState::AwaitingUrl(previous) = &self.state {
                    trace!("Discarding entry '{}' with no URL line", previous.title);
                    self.stats.discarded_entries += 1;
                }
                self.state = ParseState::AwaitingUrl(Box::new(parser.parse_entry(body)));
            }
            PlaylistLine::Comment(_) => {
                self.stats.comments += 1;
            }
            PlaylistLine::Url(raw) => {
                let state = std::mem::replace(&mut self.state, ParseState::Idle);
                match state {
                    ParseState::AwaitingUrl(pending) => {
                        let url = UrlUtils::resolve(raw, base_url);
                        self.entries.push(pending.with_url(url));
                    }
                    _ if self.header.is_some() => {
                        let url = UrlUtils::resolve(raw, base_url);
                        let title = UrlUtils::title_from_url(&url);
                        trace!("Bare URL line '{}' titled '{}'", url, title);
                        self.entries.push(ParsedEntry::bare(title, url));
                        self.stats.bare_entries += 1;
                    }
                    other => {
                        trace!("Ignoring URL line '{}' outside an extended playlist", raw);
                        self.stats.ignored_urls += 1;
                        self.state = other;
                    }
                }
            }
        }
        self
    }

    /// `#EXTM3U` may appear more than once; later attributes win
    fn merge_header(&mut self, rest: &str) {
        let matches = scan_attributes(rest);
        let mut attributes = self
            .header
            .take()
            .map(|header| header.attributes)
            .unwrap_or_default();
        attributes.extend(collect_attributes(&matches));
        self.header = Some(PlaylistHeader::from_attributes(attributes));
    }

    fn finish(self) -> ParsedPlaylist {
        let mut stats = self.stats;
        if let ParseState::AwaitingUrl(pending) = &self.state {
            trace!("Discarding trailing entry '{}' with no URL line", pending.title);
            stats.discarded_entries += 1;
        }

        debug!(
            "Parsed playlist: {} entries ({} bare) from {} lines, {} comments, {} discarded entries, {} ignored URL lines",
            self.entries.len(),
            stats.bare_entries,
            stats.lines,
            stats.comments,
            stats.discarded_entries,
            stats.ignored_urls
        );

        ParsedPlaylist {
            header: self.header,
            entries: self.entries,
        }
    }
}
