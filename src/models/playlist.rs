use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ParsedPlaylist, StringMap};

/// Source format of a playlist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaylistType {
    #[default]
    M3u,
    M3u8,
    Xspf,
    Json,
}

impl PlaylistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistType::M3u => "M3U",
            PlaylistType::M3u8 => "M3U8",
            PlaylistType::Xspf => "XSPF",
            PlaylistType::Json => "JSON",
        }
    }

    /// Guess the type from a file name or URL path; unknown extensions are M3U
    pub fn from_path(path: &str) -> Self {
        let path = crate::streaming::classification::strip_query_and_fragment(path);
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("m3u8") => PlaylistType::M3u8,
            Some("xspf") => PlaylistType::Xspf,
            Some("json") => PlaylistType::Json,
            _ => PlaylistType::M3u,
        }
    }
}

impl fmt::Display for PlaylistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaylistType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "M3U" => Ok(PlaylistType::M3u),
            "M3U8" => Ok(PlaylistType::M3u8),
            "XSPF" => Ok(PlaylistType::Xspf),
            "JSON" => Ok(PlaylistType::Json),
            other => Err(format!("unknown playlist type: {other}")),
        }
    }
}

fn default_update_interval() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_enabled() -> bool {
    true
}

/// A playlist source as the persistence layer stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub local_path: Option<String>,
    #[serde(rename = "type", default)]
    pub playlist_type: PlaylistType,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub headers: StringMap,
    #[serde(default)]
    pub cookies: StringMap,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    #[serde(default)]
    pub auto_update: bool,
    #[serde(
        with = "crate::config::duration_serde::duration",
        default = "default_update_interval"
    )]
    pub update_interval: Duration,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub channel_count: usize,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub sort_order: usize,
    pub epg_url: Option<String>,
    #[serde(default)]
    pub epg_headers: StringMap,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new<S: Into<String>>(name: S) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: None,
            local_path: None,
            playlist_type: PlaylistType::default(),
            requires_auth: false,
            headers: StringMap::new(),
            cookies: StringMap::new(),
            user_agent: None,
            referrer: None,
            auto_update: false,
            update_interval: default_update_interval(),
            last_updated: None,
            channel_count: 0,
            is_enabled: true,
            sort_order: 0,
            epg_url: None,
            epg_headers: StringMap::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Remote playlist; the type is guessed from the URL path
    pub fn from_url<S: Into<String>, U: Into<String>>(name: S, url: U) -> Self {
        let url = url.into();
        let mut playlist = Self::new(name);
        playlist.playlist_type = PlaylistType::from_path(&url);
        playlist.url = Some(url);
        playlist
    }

    /// Local playlist file; the type is guessed from the file extension
    pub fn from_path<S: Into<String>>(name: S, path: &Path) -> Self {
        let local_path = path.to_string_lossy().into_owned();
        let mut playlist = Self::new(name);
        playlist.playlist_type = PlaylistType::from_path(&local_path);
        playlist.local_path = Some(local_path);
        playlist
    }

    /// Base URL for resolving relative entries, when the playlist is remote
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Record the outcome of a parse: channel count, refresh time and the
    /// header's EPG URL when none has been configured
    pub fn apply_parsed(&mut self, parsed: &ParsedPlaylist) {
        let now = Utc::now();
        self.channel_count = parsed.entries.len();
        if self.epg_url.is_none() {
            self.epg_url = parsed.epg_url().map(str::to_string);
        }
        self.last_updated = Some(now);
        self.modified_at = now;
    }

    /// Whether an auto-updating playlist is due for a refresh
    pub fn needs_update(&self, now: DateTime<Utc>) -> bool {
        if !self.auto_update || !self.is_enabled {
            return false;
        }
        match self.last_updated {
            None => true,
            Some(last) => match chrono::Duration::from_std(self.update_interval) {
                Ok(interval) => now >= last + interval,
                Err(_) => false,
            },
        }
    }
}
