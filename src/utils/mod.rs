//! Utility modules
//!
//! - [`url`]: URL resolution and URL-derived titles
//! - [`deterministic_uuid`]: stable channel ids
//! - [`sample_data`]: fictional sample playlists

pub mod deterministic_uuid;
pub mod sample_data;
pub mod url;

pub use deterministic_uuid::{generate_channel_uuid, generate_deterministic_uuid};
pub use url::UrlUtils;
