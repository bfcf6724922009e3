#![cfg(test)]

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use m3u_channels::config::DrmSettings;
use m3u_channels::drm::{
    build_media_item, ConfiguredCapabilities, DrmSession, DrmSessionFactory, KeyRequest,
    KeySystem, OfflineLicenseHelper,
};
use m3u_channels::ingestor::{parse, to_channels};
use m3u_channels::models::{DrmConfig, DrmScheme, StringMap};
use m3u_channels::utils::sample_data::SAMPLE_PLAYLIST;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

fn factory() -> DrmSessionFactory {
    DrmSessionFactory::from_settings(DrmSettings::default())
}

#[test]
fn offline_key_file_is_served_locally() {
    let mut key_file = NamedTempFile::new().unwrap();
    write!(
        key_file,
        r#"{{ "type": "persistent-license", "keys": [ {{ "kty": "oct", "kid": "a", "k": "b" }} ] }}"#
    )
    .unwrap();

    let config = DrmConfig::new(DrmScheme::ClearKey)
        .with_offline_key(key_file.path().to_string_lossy());
    let session = factory().create_session(Some(&config));

    let DrmSession::OfflineClearKey { scheme_uuid, .. } = &session else {
        panic!("expected offline clear-key session, got {session:?}");
    };
    assert_eq!(*scheme_uuid, KeySystem::ClearKey.uuid());

    let body = session
        .clear_key_callback()
        .unwrap()
        .execute_key_request(*scheme_uuid, &KeyRequest::default())
        .unwrap();
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"keys":[{"k":"b","kid":"a","kty":"oct"}],"type":"persistent-license"}"#
    );
}

#[test]
fn malformed_offline_key_fails_at_key_request() {
    let mut key_file = NamedTempFile::new().unwrap();
    write!(key_file, "not json").unwrap();

    let config = DrmConfig::new(DrmScheme::ClearKey)
        .with_offline_key(key_file.path().to_string_lossy());
    let session = factory().create_session(Some(&config));
    assert!(session.is_supported());

    let result = session
        .clear_key_callback()
        .unwrap()
        .execute_key_request(KeySystem::ClearKey.uuid(), &KeyRequest::default());
    assert!(result.is_err());
}

#[test]
fn unreadable_offline_key_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let config =
        DrmConfig::new(DrmScheme::ClearKey).with_offline_key(missing.to_string_lossy());
    assert_eq!(factory().create_session(Some(&config)), DrmSession::Unsupported);

    // A directory cannot be read as a key file
    let config =
        DrmConfig::new(DrmScheme::ClearKey).with_offline_key(dir.path().to_string_lossy());
    assert_eq!(factory().create_session(Some(&config)), DrmSession::Unsupported);
}

#[test]
fn configured_schemes_gate_sessions() {
    let settings = DrmSettings {
        supported_schemes: vec![DrmScheme::PlayReady],
        ..DrmSettings::default()
    };
    let factory = DrmSessionFactory::from_settings(settings);

    let widevine = DrmConfig::new(DrmScheme::Widevine).with_license_url("https://lic");
    assert_eq!(factory.create_session(Some(&widevine)), DrmSession::Unsupported);

    let playready = DrmConfig::new(DrmScheme::PlayReady).with_license_url("https://lic");
    assert!(matches!(
        factory.create_session(Some(&playready)),
        DrmSession::HttpLicense(ref http) if http.key_system == KeySystem::PlayReady
    ));
}

#[test]
fn injected_capabilities_gate_sessions() {
    let factory = DrmSessionFactory::new(
        Arc::new(ConfiguredCapabilities::none()),
        DrmSettings::default(),
    );
    let widevine = DrmConfig::new(DrmScheme::Widevine).with_license_url("https://lic");
    assert_eq!(factory.create_session(Some(&widevine)), DrmSession::Unsupported);

    let mut clear_key = DrmConfig::new(DrmScheme::ClearKey);
    clear_key.clear_key_id = Some("kid".to_string());
    clear_key.clear_key = Some("key".to_string());
    assert!(factory.create_session(Some(&clear_key)).is_supported());
}

#[test]
fn sample_channels_select_sessions() {
    let channels = to_channels(parse(SAMPLE_PLAYLIST, None), Uuid::nil());
    let factory = factory();

    let sessions: Vec<_> = channels
        .iter()
        .map(|channel| factory.create_session(channel.drm_config.as_ref()))
        .collect();

    assert_eq!(sessions[0], DrmSession::Unsupported);
    assert!(matches!(&sessions[2], DrmSession::HttpLicense(http) if http.key_system == KeySystem::Widevine));
    assert!(matches!(&sessions[3], DrmSession::HttpLicense(http) if http.key_system == KeySystem::PlayReady));
    assert!(matches!(&sessions[4], DrmSession::InlineClearKey { .. }));

    let item = build_media_item(&channels[2].url, channels[2].drm_config.as_ref());
    let drm = item.drm.unwrap();
    assert_eq!(drm.scheme_uuid, KeySystem::Widevine.uuid());
    assert_eq!(drm.license_uri.as_deref(), Some("https://license.example.com/widevine"));
    assert!(build_media_item(&channels[0].url, None).drm.is_none());
}

/// Serve one canned HTTP response and hand back the raw request text
async fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}/license", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        loop {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
            if request_complete(&request) {
                break;
            }
        }

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (address, server)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

fn license_config(url: String) -> DrmConfig {
    let mut headers = StringMap::new();
    headers.insert("X-Device".to_string(), "test-device".to_string());
    DrmConfig::new(DrmScheme::Widevine)
        .with_license_url(url)
        .with_headers(headers)
}

#[tokio::test]
async fn download_license_returns_key_set_id() {
    let (url, server) = serve_once("200 OK", b"key-set-1").await;
    let helper = OfflineLicenseHelper::new(&DrmSettings::default()).unwrap();

    let (tx, rx) = oneshot::channel();
    helper.download_license(
        &license_config(url),
        KeyRequest::new(b"challenge".to_vec()),
        move |result| {
            let _ = tx.send(result);
        },
    );

    let result = tokio::time::timeout(Duration::from_secs(10), rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, Some(b"key-set-1".to_vec()));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /license"));
    assert!(request.to_ascii_lowercase().contains("x-device: test-device"));
    assert!(request.to_ascii_lowercase().contains("user-agent: iptv player"));
    assert!(request.ends_with("challenge"));
}

#[tokio::test]
async fn download_license_server_error_yields_none() {
    let (url, server) = serve_once("500 Internal Server Error", b"").await;
    let helper = OfflineLicenseHelper::new(&DrmSettings::default()).unwrap();

    let (tx, rx) = oneshot::channel();
    helper.download_license(&license_config(url), KeyRequest::default(), move |result| {
        let _ = tx.send(result);
    });

    let result = tokio::time::timeout(Duration::from_secs(10), rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, None);
    server.await.unwrap();
}

#[tokio::test]
async fn download_license_without_url_yields_none() {
    let helper = OfflineLicenseHelper::new(&DrmSettings::default()).unwrap();
    let (tx, rx) = oneshot::channel();
    helper.download_license(
        &DrmConfig::new(DrmScheme::Widevine),
        KeyRequest::default(),
        move |result| {
            let _ = tx.send(result);
        },
    );
    assert_eq!(rx.await.unwrap(), None);
}

#[tokio::test]
async fn release_license_posts_key_set_id() {
    let (url, server) = serve_once("200 OK", b"").await;
    let helper = OfflineLicenseHelper::new(&DrmSettings::default()).unwrap();

    helper.release_license(b"key-set-1".to_vec(), &license_config(url));

    let request = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .unwrap()
        .unwrap();
    assert!(request.ends_with("key-set-1"));
}

#[tokio::test]
async fn release_license_failure_is_swallowed() {
    let helper = OfflineLicenseHelper::new(&DrmSettings::default()).unwrap();
    // Nothing listens on port 9 of the loopback interface
    helper.release_license(
        b"key-set-1".to_vec(),
        &license_config("http://127.0.0.1:9/license".to_string()),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
}
