//! Playback-time DRM session selection
//!
//! ```text
//! no config / NONE                 -> Unsupported
//! WIDEVINE, PLAYREADY              -> check key system -> HttpLicense | Unsupported
//! CLEARKEY  offline key file       -> read file        -> OfflineClearKey | Unsupported
//!           inline kid + key       -> InlineClearKey
//!           otherwise              -> HttpLicense
//! ```
//!
//! Every failure ends in [`DrmSession::Unsupported`]; callers never see an
//! error from [`DrmSessionFactory::create_session`].

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::capability::DrmCapabilities;
use super::clearkey::{InlineClearKeyCallback, MediaDrmCallback, OfflineClearKeyCallback};
use super::key_system::KeySystem;
use crate::config::DrmSettings;
use crate::errors::{DrmError, DrmResult};
use crate::models::{DrmConfig, DrmScheme, StringMap};

/// License server session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpLicenseSession {
    pub key_system: KeySystem,
    pub scheme_uuid: Uuid,
    /// Empty when the playlist gave no license URL
    pub license_url: String,
    pub headers: StringMap,
    pub user_agent: String,
    pub allow_cross_protocol_redirects: bool,
}

/// Outcome of session selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrmSession {
    /// No usable session; play unprotected or fail playback
    Unsupported,
    HttpLicense(HttpLicenseSession),
    OfflineClearKey { scheme_uuid: Uuid, key_data: String },
    InlineClearKey {
        scheme_uuid: Uuid,
        key_id: String,
        key: String,
    },
}

impl DrmSession {
    pub fn is_supported(&self) -> bool {
        !matches!(self, DrmSession::Unsupported)
    }

    /// Local callback answering key requests, for the clear-key strategies
    pub fn clear_key_callback(&self) -> Option<Arc<dyn MediaDrmCallback>> {
        match self {
            DrmSession::OfflineClearKey { key_data, .. } => {
                Some(Arc::new(OfflineClearKeyCallback::new(key_data.as_str())))
            }
            DrmSession::InlineClearKey { key_id, key, .. } => Some(Arc::new(
                InlineClearKeyCallback::new(key_id.as_str(), key.as_str()),
            )),
            DrmSession::Unsupported | DrmSession::HttpLicense(_) => None,
        }
    }
}

/// Chooses a [`DrmSession`] for a channel's DRM configuration
#[derive(Clone)]
pub struct DrmSessionFactory {
    capabilities: Arc<dyn DrmCapabilities>,
    settings: DrmSettings,
}

impl DrmSessionFactory {
    pub fn new(capabilities: Arc<dyn DrmCapabilities>, settings: DrmSettings) -> Self {
        Self {
            capabilities,
            settings,
        }
    }

    /// Factory whose capability check answers from `settings.supported_schemes`
    pub fn from_settings(settings: DrmSettings) -> Self {
        let capabilities = Arc::new(settings.capabilities());
        Self::new(capabilities, settings)
    }

    pub fn create_session(&self, config: Option<&DrmConfig>) -> DrmSession {
        let Some(config) = config else {
            return DrmSession::Unsupported;
        };

        let session = match config.scheme {
            DrmScheme::None => Ok(DrmSession::Unsupported),
            DrmScheme::Widevine => self.gated_http_session(KeySystem::Widevine, config),
            DrmScheme::PlayReady => self.gated_http_session(KeySystem::PlayReady, config),
            DrmScheme::ClearKey => self.clear_key_session(config),
        };

        match session {
            Ok(session) => {
                debug!(
                    "DRM session for {}: {}",
                    config.scheme,
                    session_name(&session)
                );
                session
            }
            Err(e) => {
                warn!("DRM session unavailable for {}: {}", config.scheme, e);
                DrmSession::Unsupported
            }
        }
    }

    fn gated_http_session(
        &self,
        key_system: KeySystem,
        config: &DrmConfig,
    ) -> DrmResult<DrmSession> {
        if !self.capabilities.is_supported(key_system) {
            return Err(DrmError::SchemeUnsupported {
                scheme: key_system.scheme(),
            });
        }
        Ok(self.http_session(key_system, config))
    }

    fn clear_key_session(&self, config: &DrmConfig) -> DrmResult<DrmSession> {
        let scheme_uuid = KeySystem::ClearKey.uuid();

        if let Some(path) = config.offline_key() {
            let key_data = read_key_file(Path::new(path))?;
            return Ok(DrmSession::OfflineClearKey {
                scheme_uuid,
                key_data,
            });
        }

        if let Some((key_id, key)) = config.inline_clear_key() {
            return Ok(DrmSession::InlineClearKey {
                scheme_uuid,
                key_id: key_id.to_string(),
                key: key.to_string(),
            });
        }

        Ok(self.http_session(KeySystem::ClearKey, config))
    }

    fn http_session(&self, key_system: KeySystem, config: &DrmConfig) -> DrmSession {
        DrmSession::HttpLicense(HttpLicenseSession {
            key_system,
            scheme_uuid: key_system.uuid(),
            license_url: config.license_url.clone().unwrap_or_default(),
            headers: config.headers.clone(),
            user_agent: self.settings.user_agent.clone(),
            allow_cross_protocol_redirects: self.settings.allow_cross_protocol_redirects,
        })
    }
}

impl std::fmt::Debug for DrmSessionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrmSessionFactory")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn read_key_file(path: &Path) -> DrmResult<String> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DrmError::key_file_missing(path),
        _ => DrmError::KeyFileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn session_name(session: &DrmSession) -> &'static str {
    match session {
        DrmSession::Unsupported => "unsupported",
        DrmSession::HttpLicense(_) => "http license",
        DrmSession::OfflineClearKey { .. } => "offline clear-key",
        DrmSession::InlineClearKey { .. } => "inline clear-key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drm::capability::MockDrmCapabilities;
    use crate::drm::clearkey::KeyRequest;

    fn factory_with(supported: bool) -> DrmSessionFactory {
        let mut capabilities = MockDrmCapabilities::new();
        capabilities.expect_is_supported().return_const(supported);
        DrmSessionFactory::new(Arc::new(capabilities), DrmSettings::default())
    }

    #[test]
    fn test_no_config_is_unsupported() {
        let factory = factory_with(true);
        assert_eq!(factory.create_session(None), DrmSession::Unsupported);
        let none = DrmConfig::new(DrmScheme::None);
        assert_eq!(factory.create_session(Some(&none)), DrmSession::Unsupported);
    }

    #[test]
    fn test_widevine_capability_gates_session() {
        let mut headers = StringMap::new();
        headers.insert("X-Token".to_string(), "t".to_string());
        let config = DrmConfig::new(DrmScheme::Widevine)
            .with_license_url("https://lic")
            .with_headers(headers.clone());

        let session = factory_with(true).create_session(Some(&config));
        let DrmSession::HttpLicense(http) = session else {
            panic!("expected http license session, got {session:?}");
        };
        assert_eq!(http.key_system, KeySystem::Widevine);
        assert_eq!(http.license_url, "https://lic");
        assert_eq!(http.headers, headers);
        assert_eq!(http.user_agent, "IPTV Player");
        assert!(http.allow_cross_protocol_redirects);

        assert_eq!(
            factory_with(false).create_session(Some(&config)),
            DrmSession::Unsupported
        );
    }

    #[test]
    fn test_capability_check_asks_for_the_scheme_key_system() {
        let mut capabilities = MockDrmCapabilities::new();
        capabilities
            .expect_is_supported()
            .withf(|system| *system == KeySystem::PlayReady)
            .times(1)
            .return_const(true);
        let factory = DrmSessionFactory::new(Arc::new(capabilities), DrmSettings::default());

        let session = factory.create_session(Some(&DrmConfig::new(DrmScheme::PlayReady)));
        assert!(session.is_supported());
    }

    #[test]
    fn test_clear_key_skips_capability_check() {
        let mut capabilities = MockDrmCapabilities::new();
        capabilities.expect_is_supported().never();
        let factory = DrmSessionFactory::new(Arc::new(capabilities), DrmSettings::default());

        let mut config = DrmConfig::new(DrmScheme::ClearKey);
        config.clear_key_id = Some("kid".to_string());
        config.clear_key = Some("key".to_string());

        let session = factory.create_session(Some(&config));
        assert_eq!(
            session,
            DrmSession::InlineClearKey {
                scheme_uuid: KeySystem::ClearKey.uuid(),
                key_id: "kid".to_string(),
                key: "key".to_string(),
            }
        );
        let body = session
            .clear_key_callback()
            .unwrap()
            .execute_key_request(KeySystem::ClearKey.uuid(), &KeyRequest::default())
            .unwrap();
        assert!(String::from_utf8(body).unwrap().contains(r#""kid":"kid""#));
    }

    #[test]
    fn test_clear_key_without_material_uses_license_server() {
        let mut config = DrmConfig::new(DrmScheme::ClearKey);
        config.clear_key_id = Some("kid".to_string());
        let session = factory_with(true).create_session(Some(&config));
        let DrmSession::HttpLicense(http) = session else {
            panic!("expected http license session, got {session:?}");
        };
        assert_eq!(http.key_system, KeySystem::ClearKey);
        assert_eq!(http.license_url, "");
    }

    #[test]
    fn test_missing_offline_key_file_is_unsupported() {
        let config = DrmConfig::new(DrmScheme::ClearKey).with_offline_key("/nonexistent/key.json");
        assert_eq!(
            factory_with(true).create_session(Some(&config)),
            DrmSession::Unsupported
        );
    }

    #[test]
    fn test_session_serializes_with_strategy_tag() {
        let json = serde_json::to_value(DrmSession::Unsupported).unwrap();
        assert_eq!(json["strategy"], "UNSUPPORTED");
    }
}
