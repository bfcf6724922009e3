//! Sample data for tests, documentation and the `sample` CLI command
//!
//! Broadcaster and channel names are fictional to avoid real brand names.

/// Fictional broadcasters used by [`generate_playlist`]
pub const BROADCASTERS: [&str; 8] = [
    "StreamCast",
    "ViewMedia",
    "AeroVision",
    "GlobalStream",
    "NationalNet",
    "SportsCentral",
    "CinemaMax",
    "MusicMax",
];

/// Groups cycled through by [`generate_playlist`]
pub const GROUPS: [&str; 5] = ["News", "Sports", "Movies", "Music", "Kids"];

/// A ten channel extended playlist touching every attribute family:
/// EPG header, relative URLs, request headers and cookies, all DRM schemes,
/// radio, and the non-HTTP transports.
pub const SAMPLE_PLAYLIST: &str = r#"#EXTM3U x-tvg-url="https://epg.example.com/guide.xml"
#EXTINF:-1 tvg-id="streamcast.news" tvg-name="StreamCast News" tvg-logo="https://img.example.com/streamcast-news.png" tvg-language="English" tvg-country="GB" group-title="News",StreamCast News HD
https://live.example.com/streamcast/news/index.m3u8
#EXTINF:-1 tvg-id="viewmedia.one" group-title="Entertainment" resolution="1080p" codec="h264",ViewMedia One
live/viewmedia-one.m3u8
#EXTINF:-1 tvg-id="aerovision.sports" group-title="Sports" drm-scheme="widevine" drm-license-url="https://license.example.com/widevine",AeroVision Sports
https://dash.example.com/aerovision/sports/manifest.mpd
#EXTINF:-1 tvg-id="globalstream.movies" group-title="Movies" drm-scheme="PLAYREADY" drm-license-url="https://license.example.com/playready",GlobalStream Movies
https://ss.example.com/globalstream/movies.ism/Manifest
#EXTINF:-1 tvg-id="nationalnet.kids" group-title="Kids" drm-scheme="clearkey" clear-key-id="0123456789abcdef0123456789abcdef" clear-key="fedcba9876543210fedcba9876543210",NationalNet Kids
https://dash.example.com/nationalnet/kids/manifest.mpd
#EXTINF:-1 tvg-id="sportscentral.extra" group-title="Sports" http-headers="Authorization: Bearer sample-token|X-Client: sample" http-cookies="session=abc123; region=eu" user-agent="SamplePlayer/2.0" referrer="https://portal.example.com/",SportsCentral Extra
https://live.example.com/sportscentral/extra/index.m3u8
#EXTINF:-1 tvg-id="cinemamax.classic" group-title="Movies",CinemaMax Classic
rtmp://rtmp.example.com/live/cinemamax-classic
#EXTINF:-1 tvg-id="musicmax.radio" group-title="Music" radio="true",MusicMax Radio
https://radio.example.com/musicmax/stream.aac
#EXTINF:-1 tvg-id="streamcast.cam" group-title="Local",StreamCast City Cam
rtsp://cam.example.com/streamcast/city
#EXTINF:-1 tvg-id="viewmedia.two" group-title="Entertainment",ViewMedia Two
https://live.example.com/viewmedia/two/stream.ts
"#;

/// Base URL that the relative entries in [`SAMPLE_PLAYLIST`] resolve against
pub const SAMPLE_BASE_URL: &str = "https://live.example.com/playlists/sample.m3u8";

/// Generate an extended playlist with `count` HLS channels
///
/// Output is deterministic: names and groups cycle through [`BROADCASTERS`]
/// and [`GROUPS`].
pub fn generate_playlist(count: usize) -> String {
    let mut playlist = String::from("#EXTM3U\n");
    for index in 0..count {
        let broadcaster = BROADCASTERS[index % BROADCASTERS.len()];
        let group = GROUPS[index % GROUPS.len()];
        let slug = broadcaster.to_lowercase();
        playlist.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{slug}.{index}\" group-title=\"{group}\",{broadcaster} {}\n",
            index + 1
        ));
        playlist.push_str(&format!(
            "https://live.example.com/{slug}/{index}/index.m3u8\n"
        ));
    }
    playlist
}
