//! URL utilities for playlist entries
//!
//! Stream URL lines are resolved against the playlist's own URL when they
//! are relative, and bare URL lines get a display title derived from the URL.

use url::Url;

use crate::models::entry::UNKNOWN_CHANNEL_TITLE;

/// Schemes treated as absolute without parsing
pub const ABSOLUTE_SCHEMES: [&str; 4] = ["http://", "https://", "rtmp://", "rtsp://"];

/// URL utilities for playlist handling
pub struct UrlUtils;

impl UrlUtils {
    /// Whether a URL line starts with one of the recognized stream schemes
    ///
    /// The check is a plain prefix match; anything else (including other
    /// schemes such as `udp://`) goes through base resolution.
    pub fn is_absolute(url: &str) -> bool {
        ABSOLUTE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    }

    /// Resolve a URL line against an optional base
    ///
    /// Absolute URLs are returned unchanged. Relative references are resolved
    /// per RFC 3986 against `base`; when there is no base, or the base or the
    /// reference cannot be parsed, the raw string is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use m3u_channels::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::resolve("sub/ch.m3u8", Some("https://a.com/playlists/x.m3u8")),
    ///     "https://a.com/playlists/sub/ch.m3u8"
    /// );
    /// assert_eq!(UrlUtils::resolve("rtsp://h/s", Some("https://a.com/")), "rtsp://h/s");
    /// assert_eq!(UrlUtils::resolve("sub/ch.m3u8", None), "sub/ch.m3u8");
    /// ```
    pub fn resolve(url: &str, base: Option<&str>) -> String {
        if Self::is_absolute(url) {
            return url.to_string();
        }
        match base {
            Some(base) => Self::join(base, url).unwrap_or_else(|_| url.to_string()),
            None => url.to_string(),
        }
    }

    /// Join a base URL with a relative reference
    pub fn join(base: &str, path: &str) -> Result<String, url::ParseError> {
        let base_url = Url::parse(base)?;
        let joined = base_url.join(path)?;
        Ok(joined.to_string())
    }

    /// Display title for a URL line that has no `#EXTINF` metadata
    ///
    /// Last path segment without its extension, else the host, else
    /// "Unknown Channel".
    pub fn title_from_url(url: &str) -> String {
        let Ok(parsed) = Url::parse(url) else {
            return UNKNOWN_CHANNEL_TITLE.to_string();
        };

        let filename = parsed.path().rsplit('/').next().unwrap_or_default();
        let stem = match filename.rfind('.') {
            Some(pos) => &filename[..pos],
            None => filename,
        };
        if !stem.is_empty() {
            return stem.to_string();
        }

        parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_CHANNEL_TITLE.to_string())
    }
}
