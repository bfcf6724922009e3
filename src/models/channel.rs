use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DrmConfig, ParsedEntry, StreamType, StringMap};
use crate::utils::deterministic_uuid::generate_channel_uuid;

/// Channel record handed to persistence and playback
///
/// Semantic fields come from a [`ParsedEntry`]; playback/UI state starts at
/// its defaults and is owned by whoever persists the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub playlist_id: Uuid,
    pub name: String,
    pub url: String,
    pub logo_url: Option<String>,
    pub group: Option<String>,
    pub tvg_id: Option<String>,
    pub epg_id: Option<String>,
    pub tvg_name: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub resolution: Option<String>,
    pub codec: Option<String>,
    pub stream_type: StreamType,
    pub drm_config: Option<DrmConfig>,
    pub headers: StringMap,
    pub cookies: StringMap,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub is_radio: bool,
    pub is_enabled: bool,
    pub is_favorite: bool,
    /// 0-based position in the source playlist
    pub sort_order: usize,
    pub is_offline_available: bool,
    pub offline_path: Option<String>,
    /// Milliseconds into the stream
    pub last_played_position: u64,
    pub last_played_at: Option<DateTime<Utc>>,
}

impl Channel {
    pub fn from_entry(entry: ParsedEntry, playlist_id: Uuid, sort_order: usize) -> Self {
        let stream_type = StreamType::from_url(&entry.url);
        Self {
            id: generate_channel_uuid(&playlist_id, sort_order, &entry.url),
            playlist_id,
            name: entry.title,
            url: entry.url,
            logo_url: entry.logo_url,
            group: entry.group_title,
            tvg_id: entry.id,
            epg_id: entry.epg_id,
            tvg_name: entry.tvg_name,
            language: entry.language,
            country: entry.country,
            resolution: entry.resolution,
            codec: entry.codec,
            stream_type,
            drm_config: entry.drm_config,
            headers: entry.headers,
            cookies: entry.cookies,
            user_agent: entry.user_agent,
            referrer: entry.referrer,
            is_radio: entry.is_radio,
            is_enabled: true,
            is_favorite: false,
            sort_order,
            is_offline_available: false,
            offline_path: None,
            last_played_position: 0,
            last_played_at: None,
        }
    }
}
