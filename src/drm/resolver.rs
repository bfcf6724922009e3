//! DRM configuration from entry attributes

use tracing::trace;

use crate::models::{DrmConfig, DrmScheme, StringMap};

pub const DRM_SCHEME: &str = "drm-scheme";
pub const DRM_LICENSE_URL: &str = "drm-license-url";
pub const DRM_KEY_ID: &str = "drm-key-id";
pub const DRM_KEY: &str = "drm-key";
pub const CLEAR_KEY_ID: &str = "clear-key-id";
pub const CLEAR_KEY: &str = "clear-key";

/// Build a [`DrmConfig`] when `drm-scheme` names a known scheme
///
/// Absent, unknown and `NONE` schemes all mean no DRM. Headers and the
/// offline key fields are left empty; they are never carried in a playlist.
pub fn resolve_drm_config(attributes: &StringMap) -> Option<DrmConfig> {
    let raw_scheme = attributes.get(DRM_SCHEME)?;
    let Some(scheme) = DrmScheme::from_attribute(raw_scheme) else {
        trace!("Ignoring unrecognized drm-scheme '{}'", raw_scheme);
        return None;
    };

    let attribute = |key: &str| attributes.get(key).cloned();
    Some(DrmConfig {
        license_url: attribute(DRM_LICENSE_URL),
        key_id: attribute(DRM_KEY_ID),
        key: attribute(DRM_KEY),
        clear_key_id: attribute(CLEAR_KEY_ID),
        clear_key: attribute(CLEAR_KEY),
        ..DrmConfig::new(scheme)
    })
}
