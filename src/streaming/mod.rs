/**
 * streaming/mod.rs
 * =================
 * Stream URL classification used when channels are built from parsed entries.
 */
pub mod classification;

pub use classification::detect_stream_type;
