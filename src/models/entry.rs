use serde::{Deserialize, Serialize};

use super::{DrmConfig, StringMap};

/// Title used when neither the entry line nor the URL yields one
pub const UNKNOWN_CHANNEL_TITLE: &str = "Unknown Channel";

/// Duration reported for live streams and unparseable durations
pub const UNKNOWN_DURATION: f64 = -1.0;

/// One playlist item as read from an `#EXTINF` line and its URL line.
///
/// `url` is empty only while the entry is pending inside the parser; every
/// entry handed out by [`crate::ingestor::M3uParser`] has a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub duration: f64,
    pub title: String,
    pub url: String,
    /// Every `key="value"` attribute on the entry line, keys lower-cased
    pub attributes: StringMap,
    pub logo_url: Option<String>,
    pub group_title: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub id: Option<String>,
    pub epg_id: Option<String>,
    pub tvg_name: Option<String>,
    pub resolution: Option<String>,
    pub codec: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub is_radio: bool,
    pub headers: StringMap,
    pub cookies: StringMap,
    pub drm_config: Option<DrmConfig>,
}

impl Default for ParsedEntry {
    fn default() -> Self {
        Self {
            duration: UNKNOWN_DURATION,
            title: UNKNOWN_CHANNEL_TITLE.to_string(),
            url: String::new(),
            attributes: StringMap::new(),
            logo_url: None,
            group_title: None,
            language: None,
            country: None,
            id: None,
            epg_id: None,
            tvg_name: None,
            resolution: None,
            codec: None,
            user_agent: None,
            referrer: None,
            is_radio: false,
            headers: StringMap::new(),
            cookies: StringMap::new(),
            drm_config: None,
        }
    }
}

impl ParsedEntry {
    /// Entry for a URL line with no `#EXTINF` metadata
    pub fn bare<T: Into<String>, U: Into<String>>(title: T, url: U) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_url<U: Into<String>>(mut self, url: U) -> Self {
        self.url = url.into();
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Attributes carried on the `#EXTM3U` line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHeader {
    pub attributes: StringMap,
    /// First of `x-tvg-url`, `url-tvg`, `tvg-url`
    pub epg_url: Option<String>,
}

impl PlaylistHeader {
    pub const EPG_URL_KEYS: [&'static str; 3] = ["x-tvg-url", "url-tvg", "tvg-url"];

    pub fn from_attributes(attributes: StringMap) -> Self {
        let epg_url = Self::EPG_URL_KEYS
            .iter()
            .find_map(|key| attributes.get(*key))
            .filter(|url| !url.is_empty())
            .cloned();
        Self {
            attributes,
            epg_url,
        }
    }
}

/// Result of parsing a whole playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPlaylist {
    /// Present when the playlist carried an `#EXTM3U` line
    pub header: Option<PlaylistHeader>,
    pub entries: Vec<ParsedEntry>,
}

impl ParsedPlaylist {
    pub fn is_extended(&self) -> bool {
        self.header.is_some()
    }

    pub fn epg_url(&self) -> Option<&str> {
        self.header.as_ref().and_then(|h| h.epg_url.as_deref())
    }
}
