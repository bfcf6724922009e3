use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod channel;
pub mod codec;
pub mod drm;
pub mod entry;
pub mod playlist;

pub use channel::Channel;
pub use codec::StringMapCodec;
pub use drm::{DrmConfig, DrmScheme};
pub use entry::{ParsedEntry, ParsedPlaylist, PlaylistHeader};
pub use playlist::{Playlist, PlaylistType};

/// Header, cookie and attribute maps.
///
/// Ordered so that serialized channels and parse results are byte-stable for
/// the same input.
pub type StringMap = BTreeMap<String, String>;

/// Transport/container classification of a channel URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamType {
    #[default]
    Auto,
    Hls,
    Dash,
    SmoothStreaming,
    ProgressiveHttp,
    Rtmp,
    Rtsp,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Auto => "AUTO",
            StreamType::Hls => "HLS",
            StreamType::Dash => "DASH",
            StreamType::SmoothStreaming => "SMOOTH_STREAMING",
            StreamType::ProgressiveHttp => "PROGRESSIVE_HTTP",
            StreamType::Rtmp => "RTMP",
            StreamType::Rtsp => "RTSP",
        }
    }

    /// Classify a resolved stream URL, see [`crate::streaming::detect_stream_type`]
    pub fn from_url(url: &str) -> Self {
        crate::streaming::detect_stream_type(url)
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AUTO" => Ok(StreamType::Auto),
            "HLS" => Ok(StreamType::Hls),
            "DASH" => Ok(StreamType::Dash),
            "SMOOTH_STREAMING" => Ok(StreamType::SmoothStreaming),
            "PROGRESSIVE_HTTP" => Ok(StreamType::ProgressiveHttp),
            "RTMP" => Ok(StreamType::Rtmp),
            "RTSP" => Ok(StreamType::Rtsp),
            other => Err(format!("unknown stream type: {other}")),
        }
    }
}
