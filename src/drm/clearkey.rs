//! Clear-key license callbacks
//!
//! Clear-key needs no provisioning and no license server when the key
//! material is already known: the key request is answered locally with a
//! JSON Web Key set.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DrmError, DrmResult};

/// Key request issued by a DRM session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRequest {
    pub data: Vec<u8>,
    pub license_server_url: String,
}

impl KeyRequest {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            license_server_url: String::new(),
        }
    }
}

/// Provisioning request issued by a DRM session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub data: Vec<u8>,
    pub default_url: String,
}

/// Answers provisioning and key requests for a DRM session
pub trait MediaDrmCallback: Debug + Send + Sync {
    fn execute_provision_request(&self, uuid: Uuid, request: &ProvisionRequest)
        -> DrmResult<Vec<u8>>;

    fn execute_key_request(&self, uuid: Uuid, request: &KeyRequest) -> DrmResult<Vec<u8>>;
}

/// One key of a clear-key JSON Web Key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearKeyJwk {
    pub kty: String,
    pub kid: String,
    pub k: String,
}

/// Clear-key license response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearKeyResponse {
    pub keys: Vec<ClearKeyJwk>,
    #[serde(rename = "type")]
    pub license_type: String,
}

impl ClearKeyResponse {
    /// Single symmetric key, temporary license
    pub fn single<K: Into<String>, V: Into<String>>(key_id: K, key: V) -> Self {
        Self {
            keys: vec![ClearKeyJwk {
                kty: "oct".to_string(),
                kid: key_id.into(),
                k: key.into(),
            }],
            license_type: "temporary".to_string(),
        }
    }
}

/// Answers key requests with the contents of an offline key file
#[derive(Debug, Clone)]
pub struct OfflineClearKeyCallback {
    key_data: String,
}

impl OfflineClearKeyCallback {
    pub fn new<S: Into<String>>(key_data: S) -> Self {
        Self {
            key_data: key_data.into(),
        }
    }
}

impl MediaDrmCallback for OfflineClearKeyCallback {
    fn execute_provision_request(
        &self,
        _uuid: Uuid,
        _request: &ProvisionRequest,
    ) -> DrmResult<Vec<u8>> {
        Ok(Vec::new())
    }

    /// The file must hold a JSON object; it is returned re-serialized compactly
    fn execute_key_request(&self, _uuid: Uuid, _request: &KeyRequest) -> DrmResult<Vec<u8>> {
        let value: serde_json::Value = serde_json::from_str(&self.key_data).map_err(|e| {
            DrmError::malformed_key_data(format!("Failed to parse offline ClearKey data: {e}"))
        })?;
        if !value.is_object() {
            return Err(DrmError::malformed_key_data(
                "Offline ClearKey data is not a JSON object",
            ));
        }
        serde_json::to_vec(&value)
            .map_err(|e| DrmError::malformed_key_data(format!("Failed to encode key data: {e}")))
    }
}

/// Answers key requests from key material carried in the playlist
#[derive(Debug, Clone)]
pub struct InlineClearKeyCallback {
    key_id: String,
    key: String,
}

impl InlineClearKeyCallback {
    pub fn new<K: Into<String>, V: Into<String>>(key_id: K, key: V) -> Self {
        Self {
            key_id: key_id.into(),
            key: key.into(),
        }
    }
}

impl MediaDrmCallback for InlineClearKeyCallback {
    fn execute_provision_request(
        &self,
        _uuid: Uuid,
        _request: &ProvisionRequest,
    ) -> DrmResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn execute_key_request(&self, _uuid: Uuid, _request: &KeyRequest) -> DrmResult<Vec<u8>> {
        let response = ClearKeyResponse::single(self.key_id.as_str(), self.key.as_str());
        serde_json::to_vec(&response)
            .map_err(|e| DrmError::malformed_key_data(format!("Failed to create ClearKey response: {e}")))
    }
}
