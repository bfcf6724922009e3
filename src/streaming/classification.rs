/*!
 * Stream Type Classification
 * ==========================
 *
 * Heuristic, network-free classification of a resolved channel URL into a
 * [`StreamType`]. Rules are evaluated in order and the first match wins:
 *
 *   1. contains `.m3u8` or `m3u8`          => Hls
 *   2. contains `.mpd` or `dash`           => Dash
 *   3. contains `.ism` or `smoothstreaming` => SmoothStreaming
 *   4. starts with `rtmp://`               => Rtmp
 *   5. starts with `rtsp://`               => Rtsp
 *   6. anything else                       => Auto
 *
 * NOTE:
 *   - Matching is plain, case-sensitive substring matching over the whole URL,
 *     query string included. `https://h/dashboard/live.ts` is therefore Dash and
 *     `rtmp://h/live.m3u8` is Hls; players treat the type as a hint only.
 *   - `ProgressiveHttp` is never produced here; it is reserved for records
 *     classified by other means.
 */

use tracing::trace;

use crate::models::StreamType;

/// Substring rules, in evaluation order
const SUBSTRING_RULES: &[(&str, StreamType)] = &[
    (".m3u8", StreamType::Hls),
    ("m3u8", StreamType::Hls),
    (".mpd", StreamType::Dash),
    ("dash", StreamType::Dash),
    (".ism", StreamType::SmoothStreaming),
    ("smoothstreaming", StreamType::SmoothStreaming),
];

/// Scheme prefix rules, evaluated after the substring rules
const PREFIX_RULES: &[(&str, StreamType)] = &[
    ("rtmp://", StreamType::Rtmp),
    ("rtsp://", StreamType::Rtsp),
];

/// Classify a resolved stream URL.
pub fn detect_stream_type(url: &str) -> StreamType {
    let stream_type = SUBSTRING_RULES
        .iter()
        .find(|(needle, _)| url.contains(*needle))
        .or_else(|| PREFIX_RULES.iter().find(|(prefix, _)| url.starts_with(*prefix)))
        .map(|(_, stream_type)| *stream_type)
        .unwrap_or_default();

    trace!(
        target = "stream.classify",
        url,
        stream_type = stream_type.as_str(),
        "classification complete"
    );
    stream_type
}

/// Drop everything from the first `?` or `#`
pub fn strip_query_and_fragment(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(pos) => &url[..pos],
        None => url,
    }
}
