use serde::Serialize;
use uuid::Uuid;

use super::key_system::KeySystem;
use crate::models::{DrmConfig, StringMap};

/// Player-facing description of one protected or unprotected stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drm: Option<DrmMediaConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrmMediaConfiguration {
    pub key_system: KeySystem,
    pub scheme_uuid: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_uri: Option<String>,
    pub license_request_headers: StringMap,
    /// `"<kid>:<key>"` bytes, only for inline clear-key material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_set_id: Option<Vec<u8>>,
}

/// Build the media item for `url`, attaching DRM settings when `drm_config`
/// names a scheme other than `NONE`
pub fn build_media_item(url: &str, drm_config: Option<&DrmConfig>) -> MediaItem {
    let drm = drm_config.and_then(|config| {
        let key_system = KeySystem::for_scheme(config.scheme)?;
        let key_set_id = match key_system {
            KeySystem::ClearKey => config
                .inline_clear_key()
                .map(|(key_id, key)| clear_key_set_id(key_id, key)),
            KeySystem::Widevine | KeySystem::PlayReady => None,
        };

        Some(DrmMediaConfiguration {
            key_system,
            scheme_uuid: key_system.uuid(),
            license_uri: config.license_url.clone(),
            license_request_headers: config.headers.clone(),
            key_set_id,
        })
    });

    MediaItem {
        uri: url.to_string(),
        drm,
    }
}

fn clear_key_set_id(key_id: &str, key: &str) -> Vec<u8> {
    format!("{key_id}:{key}").into_bytes()
}
