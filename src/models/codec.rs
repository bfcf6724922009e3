//! Persisted form of header and cookie maps
//!
//! Maps are stored as a versioned list of pairs:
//!
//! ```json
//! {"version":1,"entries":[["Authorization","Bearer t"],["X-Custom","v"]]}
//! ```
//!
//! Records written before versioning used a flat JSON object; those still
//! decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StringMap;
use crate::errors::CodecError;

/// Current encoding version
pub const CODEC_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct VersionedMap {
    version: u32,
    entries: Vec<(String, String)>,
}

/// Encoder/decoder for [`StringMap`] columns
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMapCodec;

impl StringMapCodec {
    pub fn encode(map: &StringMap) -> Result<String, CodecError> {
        let wire = VersionedMap {
            version: CODEC_VERSION,
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        Ok(serde_json::to_string(&wire)?)
    }

    /// Decode any supported encoding. Empty input and JSON `null` decode to
    /// an empty map.
    pub fn decode(encoded: &str) -> Result<StringMap, CodecError> {
        let trimmed = encoded.trim();
        if trimmed.is_empty() {
            return Ok(StringMap::new());
        }

        let value: Value = serde_json::from_str(trimmed)?;
        match value {
            Value::Null => Ok(StringMap::new()),
            Value::Object(ref object) if object.get("version").is_some_and(Value::is_number) => {
                let wire: VersionedMap = serde_json::from_value(value)?;
                if wire.version != CODEC_VERSION {
                    return Err(CodecError::UnsupportedVersion {
                        version: wire.version,
                    });
                }
                Ok(wire.entries.into_iter().collect())
            }
            legacy => Ok(serde_json::from_value::<StringMap>(legacy)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StringMap {
        let mut map = StringMap::new();
        map.insert("User-Agent".to_string(), "Player/1.0".to_string());
        map.insert("Referer".to_string(), "https://portal.example.com".to_string());
        map
    }

    #[test]
    fn test_encode_is_versioned_and_ordered() {
        let encoded = StringMapCodec::encode(&sample()).unwrap();
        assert_eq!(
            encoded,
            r#"{"version":1,"entries":[["Referer","https://portal.example.com"],["User-Agent","Player/1.0"]]}"#
        );
        assert_eq!(StringMapCodec::decode(&encoded).unwrap(), sample());
    }

    #[test]
    fn test_decode_legacy_flat_object() {
        let decoded =
            StringMapCodec::decode(r#"{"User-Agent":"Player/1.0","Referer":"https://portal.example.com"}"#)
                .unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_empty_forms() {
        assert!(StringMapCodec::decode("").unwrap().is_empty());
        assert!(StringMapCodec::decode("null").unwrap().is_empty());
        assert!(StringMapCodec::decode("{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let err = StringMapCodec::decode(r#"{"version":7,"entries":[]}"#).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion { version: 7 }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            StringMapCodec::decode("[1,2,3]"),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            StringMapCodec::decode("not json"),
            Err(CodecError::Malformed(_))
        ));
    }
}
