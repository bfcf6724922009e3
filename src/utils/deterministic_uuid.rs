//! Deterministic UUID Generation
//!
//! The same inputs always produce the same UUID, so re-parsing a playlist
//! yields channels with the same ids. Ids are name-based (version 5) under
//! a fixed namespace, which keeps them stable across builds and toolchains.

use uuid::Uuid;

/// Namespace for every id this crate derives
pub const ID_NAMESPACE: Uuid = Uuid::from_u128(0x6d3375c4_8a1e_4f0b_9c52_3e7a1b0d4f21);

/// Generate a deterministic UUID based on displayable inputs
///
/// Each input is length-prefixed before hashing, so `["ab", "c"]` and
/// `["a", "bc"]` map to different ids.
///
/// # Examples
///
/// ```rust
/// use m3u_channels::utils::deterministic_uuid::generate_deterministic_uuid;
/// use uuid::Uuid;
///
/// let playlist_id = Uuid::new_v4();
/// let a = generate_deterministic_uuid(&[&playlist_id, &0usize, &"http://example.com/a.m3u8"]);
/// let b = generate_deterministic_uuid(&[&playlist_id, &0usize, &"http://example.com/a.m3u8"]);
/// assert_eq!(a, b);
/// assert_eq!(a.get_version_num(), 5);
/// ```
pub fn generate_deterministic_uuid(inputs: &[&dyn std::fmt::Display]) -> Uuid {
    let mut name = Vec::new();

    for input in inputs {
        let text = input.to_string();
        name.extend_from_slice(&(text.len() as u64).to_be_bytes());
        name.extend_from_slice(text.as_bytes());
    }

    Uuid::new_v5(&ID_NAMESPACE, &name)
}

/// Channel id from its playlist, position and stream URL
///
/// Position is part of the key so a playlist listing the same URL twice
/// still yields distinct channels.
pub fn generate_channel_uuid(playlist_id: &Uuid, sort_order: usize, stream_url: &str) -> Uuid {
    generate_deterministic_uuid(&[playlist_id, &sort_order, &stream_url])
}
