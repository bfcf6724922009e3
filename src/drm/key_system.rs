use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::DrmScheme;

/// Widevine system id
pub const WIDEVINE_UUID: Uuid = Uuid::from_u128(0xedef8ba9_79d6_4ace_a3c8_27dcd51d21ed);
/// PlayReady system id
pub const PLAYREADY_UUID: Uuid = Uuid::from_u128(0x9a04f079_9840_4286_ab92_e65be0885f95);
/// ClearKey system id
pub const CLEARKEY_UUID: Uuid = Uuid::from_u128(0xe2719d58_a985_b3c9_781a_b030af78d30e);

/// A DRM key system a device may or may not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeySystem {
    Widevine,
    PlayReady,
    ClearKey,
}

impl KeySystem {
    pub const ALL: [KeySystem; 3] = [KeySystem::Widevine, KeySystem::PlayReady, KeySystem::ClearKey];

    /// Key system for a scheme; `None` has no key system
    pub fn for_scheme(scheme: DrmScheme) -> Option<Self> {
        match scheme {
            DrmScheme::None => None,
            DrmScheme::Widevine => Some(KeySystem::Widevine),
            DrmScheme::PlayReady => Some(KeySystem::PlayReady),
            DrmScheme::ClearKey => Some(KeySystem::ClearKey),
        }
    }

    pub fn scheme(&self) -> DrmScheme {
        match self {
            KeySystem::Widevine => DrmScheme::Widevine,
            KeySystem::PlayReady => DrmScheme::PlayReady,
            KeySystem::ClearKey => DrmScheme::ClearKey,
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            KeySystem::Widevine => WIDEVINE_UUID,
            KeySystem::PlayReady => PLAYREADY_UUID,
            KeySystem::ClearKey => CLEARKEY_UUID,
        }
    }

    /// Encrypted Media Extensions key system name
    pub fn eme_name(&self) -> &'static str {
        match self {
            KeySystem::Widevine => "com.widevine.alpha",
            KeySystem::PlayReady => "com.microsoft.playready",
            KeySystem::ClearKey => "org.w3.clearkey",
        }
    }
}

impl fmt::Display for KeySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.eme_name())
    }
}
