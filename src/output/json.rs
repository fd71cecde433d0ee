//! JSON output for scripting.
//!
//! Shapes follow the service's plain-data results:
//!
//! ```json
//! {"synced": true}
//! {"result": "Successfully synced Abbey Road to /media/player/Abbey Road"}
//! {"path": "/music/Abbey Road", "fingerprint": "9f86d0..."}
//! [
//!   {
//!     "path": "/music/Beatles/Abbey Road",
//!     "name": "Abbey Road",
//!     "artist": "Beatles",
//!     "album": "Abbey Road",
//!     "mp3_count": 17,
//!     "has_cover": true,
//!     "size_mb": 112.4,
//!     "is_synced": false,
//!     "fingerprint": "9f86d0..."
//!   }
//! ]
//! ```

use std::path::Path;

use serde::Serialize;

use crate::library::AlbumFolder;

/// An album record in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonAlbum {
    pub path: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub mp3_count: usize,
    pub audio_count: usize,
    pub has_cover: bool,
    pub size_mb: f64,
    pub is_synced: bool,
    pub fingerprint: String,
}

impl JsonAlbum {
    /// Convert a scan record, rendering the path lossily as UTF-8.
    #[must_use]
    pub fn from_album(album: &AlbumFolder) -> Self {
        Self {
            path: album.path.to_string_lossy().into_owned(),
            name: album.name.clone(),
            artist: album.artist.clone(),
            album: album.album.clone(),
            mp3_count: album.mp3_count,
            audio_count: album.audio_count,
            has_cover: album.has_cover,
            size_mb: album.size_mb(),
            is_synced: album.is_synced,
            fingerprint: album.fingerprint.clone(),
        }
    }
}

/// A fingerprint lookup in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFingerprint {
    pub path: String,
    /// Empty when the directory could not be read.
    pub fingerprint: String,
}

impl JsonFingerprint {
    #[must_use]
    pub fn new(path: &Path, fingerprint: String) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            fingerprint,
        }
    }
}

/// Serialize scan results as a pretty-printed array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn albums_to_json(albums: &[AlbumFolder]) -> serde_json::Result<String> {
    let records: Vec<JsonAlbum> = albums.iter().map(JsonAlbum::from_album).collect();
    serde_json::to_string_pretty(&records)
}

/// Serialize any result value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
