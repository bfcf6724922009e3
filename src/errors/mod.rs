//! Centralized error handling
//!
//! # Error Categories
//!
//! - **Configuration Errors**: config file loading and validation
//! - **DRM Errors**: offline key files, key system capability, license requests
//! - **Codec Errors**: persisted header/cookie map encoding
//!
//! Playlist parsing has no error category: malformed input degrades to
//! defaults and parsing continues with the next line.
//!
//! # Usage
//!
//! ```rust
//! use m3u_channels::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for DRM Results
pub type DrmResult<T> = Result<T, DrmError>;
