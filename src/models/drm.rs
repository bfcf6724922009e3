use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StringMap;

/// DRM scheme named by a playlist's `drm-scheme` attribute
///
/// `None` exists for persisted records; the parser never builds a
/// [`DrmConfig`] with it (absence of DRM is `Option::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DrmScheme {
    None,
    Widevine,
    PlayReady,
    ClearKey,
}

impl DrmScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrmScheme::None => "NONE",
            DrmScheme::Widevine => "WIDEVINE",
            DrmScheme::PlayReady => "PLAYREADY",
            DrmScheme::ClearKey => "CLEARKEY",
        }
    }

    /// Parse a scheme from an attribute value, case-insensitively.
    ///
    /// Returns `None` for unknown values and for `NONE` itself, so callers can
    /// map the result straight onto "DRM configuration present or not".
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.parse::<DrmScheme>() {
            Ok(DrmScheme::None) | Err(_) => None,
            Ok(scheme) => Some(scheme),
        }
    }
}

impl fmt::Display for DrmScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrmScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(DrmScheme::None),
            "WIDEVINE" => Ok(DrmScheme::Widevine),
            "PLAYREADY" => Ok(DrmScheme::PlayReady),
            "CLEARKEY" => Ok(DrmScheme::ClearKey),
            other => Err(format!("unknown DRM scheme: {other}")),
        }
    }
}

/// DRM configuration attached to a channel
///
/// `key_id`/`key` are key-server material, `clear_key_id`/`clear_key` are
/// inline clear-key material. `headers` and the offline fields are never set
/// by the playlist parser; offline-license flows fill them in later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrmConfig {
    pub scheme: DrmScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_key: Option<String>,
    #[serde(default)]
    pub headers: StringMap,
    #[serde(default)]
    pub is_offline_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_key_path: Option<String>,
}

impl DrmConfig {
    pub fn new(scheme: DrmScheme) -> Self {
        Self {
            scheme,
            license_url: None,
            key_id: None,
            key: None,
            clear_key_id: None,
            clear_key: None,
            headers: StringMap::new(),
            is_offline_key: false,
            offline_key_path: None,
        }
    }

    pub fn with_license_url<S: Into<String>>(mut self, url: S) -> Self {
        self.license_url = Some(url.into());
        self
    }

    pub fn with_headers(mut self, headers: StringMap) -> Self {
        self.headers = headers;
        self
    }

    /// Mark this configuration as backed by a clear-key file on disk
    pub fn with_offline_key<S: Into<String>>(mut self, path: S) -> Self {
        self.is_offline_key = true;
        self.offline_key_path = Some(path.into());
        self
    }

    /// Both inline clear-key values are present and non-empty
    pub fn inline_clear_key(&self) -> Option<(&str, &str)> {
        match (self.clear_key_id.as_deref(), self.clear_key.as_deref()) {
            (Some(kid), Some(key)) if !kid.is_empty() && !key.is_empty() => Some((kid, key)),
            _ => None,
        }
    }

    /// Offline key path, when the offline flag is set and the path is non-empty
    pub fn offline_key(&self) -> Option<&str> {
        if !self.is_offline_key {
            return None;
        }
        self.offline_key_path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parsing_is_case_insensitive() {
        assert_eq!(DrmScheme::from_attribute("widevine"), Some(DrmScheme::Widevine));
        assert_eq!(DrmScheme::from_attribute("PlayReady"), Some(DrmScheme::PlayReady));
        assert_eq!(DrmScheme::from_attribute("CLEARKEY"), Some(DrmScheme::ClearKey));
        assert_eq!(DrmScheme::from_attribute("none"), None);
        assert_eq!(DrmScheme::from_attribute("bogus"), None);
    }

    #[test]
    fn test_inline_clear_key_requires_both_values() {
        let mut config = DrmConfig::new(DrmScheme::ClearKey);
        config.clear_key_id = Some("kid".to_string());
        assert!(config.inline_clear_key().is_none());

        config.clear_key = Some(String::new());
        assert!(config.inline_clear_key().is_none());

        config.clear_key = Some("key".to_string());
        assert_eq!(config.inline_clear_key(), Some(("kid", "key")));
    }

    #[test]
    fn test_offline_key_needs_flag_and_path() {
        let mut config = DrmConfig::new(DrmScheme::ClearKey);
        config.offline_key_path = Some("/tmp/key.json".to_string());
        assert!(config.offline_key().is_none());

        let config = DrmConfig::new(DrmScheme::ClearKey).with_offline_key("");
        assert!(config.offline_key().is_none());

        let config = DrmConfig::new(DrmScheme::ClearKey).with_offline_key("/tmp/key.json");
        assert_eq!(config.offline_key(), Some("/tmp/key.json"));
    }

    #[test]
    fn test_serialized_scheme_names() {
        let config = DrmConfig::new(DrmScheme::PlayReady).with_license_url("https://lic");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["scheme"], "PLAYREADY");
        assert_eq!(json["license_url"], "https://lic");
        assert!(json.get("clear_key").is_none());
    }
}
