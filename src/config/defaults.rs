/// Configuration default values
///
/// All defaults live here so they can be changed in one place.
use crate::models::DrmScheme;

// DRM defaults
pub const DEFAULT_DRM_USER_AGENT: &str = "IPTV Player";
pub const DEFAULT_ALLOW_CROSS_PROTOCOL_REDIRECTS: bool = true;
pub const DEFAULT_LICENSE_TIMEOUT: &str = "30s";
pub const DEFAULT_SUPPORTED_SCHEMES: [DrmScheme; 3] =
    [DrmScheme::Widevine, DrmScheme::PlayReady, DrmScheme::ClearKey];

// Config file
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
