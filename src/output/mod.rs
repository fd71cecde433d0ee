//! Output formatters for command results.
//!
//! - [`json`]: machine-readable JSON mirroring the service result types
//! - [`text`]: human-readable lines for terminals

pub mod json;
pub mod text;

pub use json::{albums_to_json, to_json, JsonAlbum, JsonFingerprint};
pub use text::{format_album, format_albums};
