//! Offline license download and release
//!
//! Both operations are fire-and-forget: they spawn onto the current tokio
//! runtime and report through a callback (download) or the log (release).
//! There is no cancellation.

use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

use super::clearkey::KeyRequest;
use crate::config::DrmSettings;
use crate::errors::{DrmError, DrmResult};
use crate::models::{DrmConfig, DrmScheme, StringMap};

const MAX_REDIRECTS: usize = 10;

/// Downloads and releases offline licenses against a config's license server
#[derive(Debug, Clone)]
pub struct OfflineLicenseHelper {
    client: Client,
}

impl OfflineLicenseHelper {
    pub fn new(settings: &DrmSettings) -> DrmResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.license_timeout)
            .redirect(redirect_policy(settings.allow_cross_protocol_redirects))
            .build()?;
        Ok(Self { client })
    }

    /// Request an offline license for `request`
    ///
    /// `callback` receives the key set id on success, or `None` when the
    /// config has no scheme or license URL, no runtime is available, or the
    /// request fails.
    pub fn download_license<F>(&self, config: &DrmConfig, request: KeyRequest, callback: F)
    where
        F: FnOnce(Option<Vec<u8>>) + Send + 'static,
    {
        let license_url = match license_target(config) {
            Ok(url) => url,
            Err(e) => {
                debug!("No offline license download: {}", e);
                callback(None);
                return;
            }
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Cannot download offline license without a runtime: {}", e);
                callback(None);
                return;
            }
        };

        let client = self.client.clone();
        let headers = config.headers.clone();
        handle.spawn(async move {
            match post_license(&client, &license_url, &headers, request.data).await {
                Ok(key_set_id) => {
                    debug!(
                        "Downloaded offline license from {} ({} bytes)",
                        license_url,
                        key_set_id.len()
                    );
                    callback(Some(key_set_id));
                }
                Err(e) => {
                    warn!("Offline license download from {} failed: {}", license_url, e);
                    callback(None);
                }
            }
        });
    }

    /// Release a previously downloaded license; failures are only logged
    pub fn release_license(&self, key_set_id: Vec<u8>, config: &DrmConfig) {
        let license_url = match license_target(config) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot release offline license: {}", e);
                return;
            }
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Cannot release offline license without a runtime: {}", e);
                return;
            }
        };

        let client = self.client.clone();
        let headers = config.headers.clone();
        handle.spawn(async move {
            match post_license(&client, &license_url, &headers, key_set_id).await {
                Ok(_) => debug!("Released offline license at {}", license_url),
                Err(e) => warn!("Offline license release at {} failed: {}", license_url, e),
            }
        });
    }
}

/// Lowercase hex rendering of a key set id for display and storage
pub fn key_set_id_hex(key_set_id: &[u8]) -> String {
    hex::encode(key_set_id)
}

/// License URL for a config that can talk to a license server
fn license_target(config: &DrmConfig) -> DrmResult<String> {
    config
        .license_url
        .as_deref()
        .filter(|url| !url.is_empty() && config.scheme != DrmScheme::None)
        .map(str::to_string)
        .ok_or(DrmError::MissingLicenseUrl {
            scheme: config.scheme,
        })
}

async fn post_license(
    client: &Client,
    license_url: &str,
    headers: &StringMap,
    body: Vec<u8>,
) -> DrmResult<Vec<u8>> {
    let mut request = client.post(license_url).body(body);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DrmError::license_request(format!(
            "License server returned {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response.bytes().await?.to_vec())
}

fn redirect_policy(allow_cross_protocol: bool) -> Policy {
    if allow_cross_protocol {
        return Policy::limited(MAX_REDIRECTS);
    }
    Policy::custom(|attempt| {
        let same_scheme = attempt
            .previous()
            .last()
            .map_or(true, |previous| previous.scheme() == attempt.url().scheme());
        if !same_scheme {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}
