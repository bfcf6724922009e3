//! DRM configuration and playback-time session selection
//!
//! - [`resolver`]: `drm-*` / `clear-key*` entry attributes to [`DrmConfig`]
//! - [`session`]: [`DrmConfig`] to a [`DrmSession`] strategy
//! - [`media_item`]: player-facing media item with DRM settings attached
//! - [`license`]: offline license download and release
//!
//! [`DrmConfig`]: crate::models::DrmConfig

pub mod capability;
pub mod clearkey;
pub mod key_system;
pub mod license;
pub mod media_item;
pub mod resolver;
pub mod session;

pub use capability::{ConfiguredCapabilities, DrmCapabilities};
pub use clearkey::{InlineClearKeyCallback, KeyRequest, MediaDrmCallback, OfflineClearKeyCallback};
pub use key_system::KeySystem;
pub use license::{key_set_id_hex, OfflineLicenseHelper};
pub use media_item::{build_media_item, MediaItem};
pub use resolver::resolve_drm_config;
pub use session::{DrmSession, DrmSessionFactory, HttpLicenseSession};
