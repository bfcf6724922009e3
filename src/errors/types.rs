//! Error type definitions for the playlist ingestion core
//!
//! Parsing itself never fails; these types cover the fallible edges around
//! it: configuration loading, the persisted map codec, and the DRM session
//! and offline license helpers (which degrade to soft failures at their
//! public boundary but use typed errors internally).

use std::path::PathBuf;

use thiserror::Error;

use crate::models::DrmScheme;

/// Top-level application error type
///
/// Uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Filesystem errors (playlist files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config file could not be rendered
    #[error("Config render error: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// DRM session / license errors
    #[error("DRM error: {0}")]
    Drm(#[from] DrmError),

    /// Header/cookie codec errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// DRM specific errors
///
/// None of these reach a playback caller: the session factory and the
/// license helper turn them into the unsupported sentinel or a `None`
/// completion after logging them.
#[derive(Error, Debug)]
pub enum DrmError {
    #[error("Offline key file not found: {}", path.display())]
    KeyFileMissing { path: PathBuf },

    #[error("Offline key file unreadable: {}", path.display())]
    KeyFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed key data: {message}")]
    MalformedKeyData { message: String },

    #[error("Key system not supported on this device: {scheme}")]
    SchemeUnsupported { scheme: DrmScheme },

    #[error("No license URL configured for {scheme}")]
    MissingLicenseUrl { scheme: DrmScheme },

    #[error("License request failed: {message}")]
    LicenseRequest { message: String },

    #[error("License server HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors decoding persisted header/cookie maps
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Unsupported map encoding version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Malformed map encoding: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl DrmError {
    pub fn key_file_missing<P: Into<PathBuf>>(path: P) -> Self {
        Self::KeyFileMissing { path: path.into() }
    }

    pub fn malformed_key_data<M: Into<String>>(message: M) -> Self {
        Self::MalformedKeyData {
            message: message.into(),
        }
    }

    pub fn license_request<M: Into<String>>(message: M) -> Self {
        Self::LicenseRequest {
            message: message.into(),
        }
    }
}
