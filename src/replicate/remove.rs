//! Name-based album removal.
//!
//! [`unsync_album`] deletes `target_directory/<album_name>` and everything
//! under it. Nothing is fingerprinted first: whatever folder carries that
//! name is removed. Deletion is permanent.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error type for unsync operations.
#[derive(Debug, Error)]
pub enum UnsyncError {
    /// No entry with the album name exists in the target directory.
    #[error("album {album} not found in target directory")]
    NotFound { album: String, target: PathBuf },

    /// The album name is empty, `.`/`..`, or spans several path components.
    #[error("invalid album name: {0:?}")]
    InvalidName(String),

    /// Deleting the album failed part-way.
    #[error("failed to remove album {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful unsync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsyncOutcome {
    /// Album name as supplied by the caller.
    pub album_name: String,
    /// Path that was deleted.
    pub removed_path: PathBuf,
}

impl UnsyncOutcome {
    /// Human-readable summary of the operation.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Successfully removed {}", self.album_name)
    }
}

/// Reject names that would resolve to anything but a direct child.
fn validate_album_name(album_name: &str) -> Result<(), UnsyncError> {
    let mut components = Path::new(album_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(UnsyncError::InvalidName(album_name.to_string())),
    }
}

/// Recursively delete `target_directory/<album_name>`.
///
/// # Errors
///
/// Returns [`UnsyncError::InvalidName`] for names that are not a single
/// path component, [`UnsyncError::NotFound`] if nothing by that name exists
/// (the target directory is left untouched), and [`UnsyncError::Remove`] if
/// deletion fails. A failed removal may leave part of the album behind.
pub fn unsync_album(target_directory: &Path, album_name: &str) -> Result<UnsyncOutcome, UnsyncError> {
    validate_album_name(album_name)?;
    let path = target_directory.join(album_name);

    let metadata = match fs::symlink_metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(UnsyncError::NotFound {
                album: album_name.to_string(),
                target: target_directory.to_path_buf(),
            });
        }
        Err(e) => return Err(UnsyncError::Remove { path, source: e }),
    };

    log::info!("Removing {}", path.display());

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };
    removed.map_err(|e| UnsyncError::Remove {
        path: path.clone(),
        source: e,
    })?;

    Ok(UnsyncOutcome {
        album_name: album_name.to_string(),
        removed_path: path,
    })
}
