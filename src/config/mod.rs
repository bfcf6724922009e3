use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::drm::capability::ConfiguredCapabilities;
use crate::drm::key_system::KeySystem;
use crate::errors::{AppError, AppResult};
use crate::models::DrmScheme;

pub mod defaults;
pub mod duration_serde;

pub use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub drm: DrmSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Base for relative URL lines when the caller does not pass one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrmSettings {
    /// User agent for license server requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_allow_cross_protocol_redirects")]
    pub allow_cross_protocol_redirects: bool,
    /// Key systems this device provides; drives the capability check
    #[serde(default = "default_supported_schemes")]
    pub supported_schemes: Vec<DrmScheme>,
    #[serde(
        default = "default_license_timeout",
        with = "duration_serde::duration"
    )]
    pub license_timeout: Duration,
}

fn default_user_agent() -> String {
    DEFAULT_DRM_USER_AGENT.to_string()
}

fn default_allow_cross_protocol_redirects() -> bool {
    DEFAULT_ALLOW_CROSS_PROTOCOL_REDIRECTS
}

fn default_supported_schemes() -> Vec<DrmScheme> {
    DEFAULT_SUPPORTED_SCHEMES.to_vec()
}

fn default_license_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_LICENSE_TIMEOUT).unwrap_or(Duration::from_secs(30))
}

impl Default for DrmSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            allow_cross_protocol_redirects: default_allow_cross_protocol_redirects(),
            supported_schemes: default_supported_schemes(),
            license_timeout: default_license_timeout(),
        }
    }
}

impl DrmSettings {
    /// Capability check answering from `supported_schemes`
    pub fn capabilities(&self) -> ConfiguredCapabilities {
        ConfiguredCapabilities::new(
            self.supported_schemes
                .iter()
                .filter_map(|scheme| KeySystem::for_scheme(*scheme)),
        )
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Read `config_file`, or write the defaults there when it does not exist
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> AppResult<Self> {
        let path = config_file.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, contents)?;
            info!("Created default config file: {}", path.display());
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(base_url) = &self.parser.base_url {
            url::Url::parse(base_url).map_err(|e| {
                AppError::configuration(format!("parser.base_url '{base_url}' is not a URL: {e}"))
            })?;
        }
        if self.drm.user_agent.trim().is_empty() {
            return Err(AppError::configuration("drm.user_agent must not be empty"));
        }
        if self.drm.supported_schemes.contains(&DrmScheme::None) {
            return Err(AppError::configuration(
                "drm.supported_schemes cannot list NONE",
            ));
        }
        if self.drm.license_timeout.is_zero() {
            return Err(AppError::configuration(
                "drm.license_timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drm::capability::DrmCapabilities;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("user_agent = \"IPTV Player\""));
        assert!(written.contains("license_timeout = \"30s\""));
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[parser]\nbase_url = \"https://a.com/list.m3u8\"\n\n[drm]\nsupported_schemes = [\"CLEARKEY\"]\nlicense_timeout = \"5s\"\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.parser.base_url.as_deref(), Some("https://a.com/list.m3u8"));
        assert_eq!(config.drm.user_agent, DEFAULT_DRM_USER_AGENT);
        assert!(config.drm.allow_cross_protocol_redirects);
        assert_eq!(config.drm.license_timeout, Duration::from_secs(5));

        let caps = config.drm.capabilities();
        assert!(caps.is_supported(KeySystem::ClearKey));
        assert!(!caps.is_supported(KeySystem::Widevine));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.parser.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(AppError::Configuration { .. })));

        let mut config = Config::default();
        config.drm.supported_schemes.push(DrmScheme::None);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.drm.license_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[drm\nuser_agent = ").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(AppError::ConfigParse(_))
        ));
    }
}
