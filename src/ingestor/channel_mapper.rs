use tracing::debug;
use uuid::Uuid;

use crate::models::{Channel, ParsedEntry};

/// One channel per entry; `sort_order` is the entry's index
pub fn to_channels(entries: Vec<ParsedEntry>, playlist_id: Uuid) -> Vec<Channel> {
    let channels: Vec<Channel> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Channel::from_entry(entry, playlist_id, index))
        .collect();

    debug!(
        "Mapped {} channels for playlist {}",
        channels.len(),
        playlist_id
    );
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreamType;

    #[test]
    fn test_sort_order_follows_input_order() {
        let entries = vec![
            ParsedEntry::bare("a", "https://h/a.m3u8"),
            ParsedEntry::bare("b", "https://h/b.mpd"),
            ParsedEntry::bare("c", "rtsp://h/c"),
        ];
        let channels = to_channels(entries, Uuid::new_v4());

        let orders: Vec<_> = channels.iter().map(|c| c.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        let types: Vec<_> = channels.iter().map(|c| c.stream_type).collect();
        assert_eq!(types, vec![StreamType::Hls, StreamType::Dash, StreamType::Rtsp]);
    }

    #[test]
    fn test_empty_input() {
        assert!(to_channels(Vec::new(), Uuid::new_v4()).is_empty());
    }
}
