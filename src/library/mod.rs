//! Album discovery in a music library.
//!
//! This module provides functionality for:
//! - Finding folders that directly contain audio files
//! - Deriving artist and album names from the folder layout
//! - Locating cover art beside or above an album
//!
//! # Architecture
//!
//! - [`scan`]: directory walk producing [`AlbumFolder`] records
//! - [`naming`]: artist/album name heuristics
//!
//! Records are snapshots: they are rebuilt on every scan and never updated.

pub mod naming;
pub mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

pub use naming::{is_root_level_folder, parse_artist_and_album, UNKNOWN_ARTIST};
pub use scan::{scan_albums, AudioCounts};

/// One album folder found by a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumFolder {
    /// Path of the album folder as walked.
    pub path: PathBuf,
    /// Base name of the folder.
    pub name: String,
    /// Artist derived from the folder layout.
    pub artist: String,
    /// Album title derived from the folder layout.
    pub album: String,
    /// Immediate `.mp3` files.
    pub mp3_count: usize,
    /// Immediate files with any configured audio extension.
    pub audio_count: usize,
    /// Whether cover art was found in the folder or its parent.
    pub has_cover: bool,
    /// Total size of all files under the folder, recursively.
    pub size_bytes: u64,
    /// Folder fingerprint, empty if it could not be computed.
    pub fingerprint: String,
    /// Whether a fingerprint twin exists in the scan's target directory.
    pub is_synced: bool,
}

impl AlbumFolder {
    /// Folder size in mebibytes.
    #[must_use]
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Look for `cover_file_name` in `album_path`, then in its parent.
#[must_use]
pub fn find_cover_image(album_path: &Path, cover_file_name: &str) -> Option<PathBuf> {
    let own = album_path.join(cover_file_name);
    if fs::metadata(&own).is_ok() {
        return Some(own);
    }

    let parent = album_path.parent()?.join(cover_file_name);
    if fs::metadata(&parent).is_ok() {
        return Some(parent);
    }

    None
}

/// No cover image beside or above an album folder.
#[derive(Debug, Error)]
#[error("cover image {file_name} not found for {}", .album.display())]
pub struct CoverNotFound {
    /// Album folder that was searched.
    pub album: PathBuf,
    /// Cover file name looked up.
    pub file_name: String,
}

/// Like [`find_cover_image`], but a missing cover is an error.
///
/// # Errors
///
/// Returns [`CoverNotFound`] when neither the album folder nor its parent
/// holds `cover_file_name`.
pub fn require_cover_image(
    album_path: &Path,
    cover_file_name: &str,
) -> Result<PathBuf, CoverNotFound> {
    find_cover_image(album_path, cover_file_name).ok_or_else(|| CoverNotFound {
        album: album_path.to_path_buf(),
        file_name: cover_file_name.to_string(),
    })
}

/// Sum the sizes of every non-directory entry under `path`.
///
/// Entries that cannot be read are skipped.
#[must_use]
pub fn folder_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
