//! IPTV playlist ingestion core
//!
//! Parses M3U/M3U8 playlist text into channel records and decides, at
//! playback time, how a channel's DRM session should be built.
//!
//! ```rust
//! use m3u_channels::ingestor::{parse, to_channels};
//! use m3u_channels::models::StreamType;
//! use uuid::Uuid;
//!
//! let content = "#EXTM3U\n#EXTINF:-1 tvg-id=\"x\" group-title=\"News\",Morning News\nlive/news.m3u8\n";
//! let entries = parse(content, Some("https://a.com/playlists/x.m3u8"));
//! let channels = to_channels(entries, Uuid::nil());
//!
//! assert_eq!(channels[0].name, "Morning News");
//! assert_eq!(channels[0].url, "https://a.com/playlists/live/news.m3u8");
//! assert_eq!(channels[0].stream_type, StreamType::Hls);
//! ```

pub mod config;
pub mod drm;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod streaming;
pub mod utils;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use ingestor::{parse, parse_playlist, to_channels, M3uParser, PlaylistIngestor};
pub use models::{Channel, DrmConfig, DrmScheme, ParsedEntry, ParsedPlaylist, StreamType};
