//! Playlist ingestion: text in, entries and channels out
//!
//! ```text
//! text -> lines -> { header | entry marker | comment | URL }
//!      -> entries (extinf + http_attributes + drm resolver + URL resolution)
//!      -> channels (channel_mapper + stream type classification)
//! ```
//!
//! Fetching playlist text and storing channels belong to the caller.

use uuid::Uuid;

use crate::models::{Channel, ParsedEntry, ParsedPlaylist};

pub mod channel_mapper;
pub mod extinf;
pub mod http_attributes;
pub mod lines;
pub mod m3u_parser;

pub use m3u_parser::M3uParser;

/// Parser seam for callers that take the parser as a dependency
pub trait PlaylistIngestor: Send + Sync {
    fn parse_playlist(&self, content: &str, base_url: Option<&str>) -> ParsedPlaylist;

    fn parse(&self, content: &str, base_url: Option<&str>) -> Vec<ParsedEntry> {
        self.parse_playlist(content, base_url).entries
    }

    fn to_channels(&self, entries: Vec<ParsedEntry>, playlist_id: Uuid) -> Vec<Channel> {
        channel_mapper::to_channels(entries, playlist_id)
    }
}

/// Parse playlist text with the default parser
pub fn parse(content: &str, base_url: Option<&str>) -> Vec<ParsedEntry> {
    M3uParser::new().parse(content, base_url)
}

/// Parse playlist text, keeping the header, with the default parser
pub fn parse_playlist(content: &str, base_url: Option<&str>) -> ParsedPlaylist {
    M3uParser::new().parse_playlist(content, base_url)
}

/// Map parsed entries onto channels of `playlist_id`
pub fn to_channels(entries: Vec<ParsedEntry>, playlist_id: Uuid) -> Vec<Channel> {
    channel_mapper::to_channels(entries, playlist_id)
}
