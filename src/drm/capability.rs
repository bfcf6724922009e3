//! Key system capability checks
//!
//! Whether a device can instantiate a key system is platform knowledge the
//! core does not have, so the check is a trait. [`ConfiguredCapabilities`]
//! answers from the `drm.supported_schemes` config list.

use std::collections::HashSet;

use super::key_system::KeySystem;

#[cfg_attr(test, mockall::automock)]
pub trait DrmCapabilities: Send + Sync {
    fn is_supported(&self, key_system: KeySystem) -> bool;
}

/// Capabilities from a fixed list of key systems
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredCapabilities {
    supported: HashSet<KeySystem>,
}

impl ConfiguredCapabilities {
    pub fn new<I: IntoIterator<Item = KeySystem>>(supported: I) -> Self {
        Self {
            supported: supported.into_iter().collect(),
        }
    }

    pub fn all() -> Self {
        Self::new(KeySystem::ALL)
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl DrmCapabilities for ConfiguredCapabilities {
    fn is_supported(&self, key_system: KeySystem) -> bool {
        self.supported.contains(&key_system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_capabilities() {
        let caps = ConfiguredCapabilities::new([KeySystem::Widevine]);
        assert!(caps.is_supported(KeySystem::Widevine));
        assert!(!caps.is_supported(KeySystem::PlayReady));
        assert!(ConfiguredCapabilities::all().is_supported(KeySystem::ClearKey));
        assert!(!ConfiguredCapabilities::none().is_supported(KeySystem::Widevine));
    }
}
