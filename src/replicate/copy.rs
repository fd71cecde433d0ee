//! One-way recursive album copy.
//!
//! # Overview
//!
//! [`sync_album`] copies `source` into `target_directory/<source base name>`:
//! - The target folder and its parents are created when absent
//! - Directories are recreated, files are copied byte-for-byte
//! - Existing target files are overwritten without comparison
//! - The first error aborts the walk; whatever was copied stays on disk
//!
//! Re-running a sync after a failure overwrites the partial copy, so the
//! operation converges without any rollback logic.
//!
//! # Example
//!
//! ```no_run
//! use albumsync::replicate::sync_album;
//! use std::path::Path;
//!
//! match sync_album(Path::new("/music/Abbey Road"), Path::new("/media/player"), None) {
//!     Ok(outcome) => println!("{}", outcome.message()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::progress::{ProgressCallback, PHASE_COPY};

/// Error type for sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source path has no usable base name (e.g. `/` or `..`).
    #[error("invalid source path: {0}")]
    InvalidSource(PathBuf),

    /// The album folder under the target would be the source itself or lie
    /// inside it, so copying would overwrite or recurse into the source.
    #[error("target {} overlaps source album {}", .target.display(), .album.display())]
    Overlap {
        album: PathBuf,
        target: PathBuf,
    },

    /// The album folder could not be created under the target directory.
    #[error("failed to create target directory {path}: {source}")]
    CreateTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Walking, creating, or copying an entry failed.
    #[error("failed to copy files at {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidSource(p)
            | Self::Overlap { target: p, .. }
            | Self::CreateTarget { path: p, .. }
            | Self::Copy { path: p, .. } => p,
        }
    }
}

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Base name of the synced album folder.
    pub album_name: String,
    /// Album folder created or refreshed under the target directory.
    pub target_path: PathBuf,
    /// Number of files copied.
    pub files_copied: usize,
    /// Number of directories created or confirmed (album root included).
    pub directories: usize,
    /// Total bytes written.
    pub bytes_copied: u64,
}

impl SyncOutcome {
    /// Human-readable summary of the operation.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Successfully synced {} to {}",
            self.album_name,
            self.target_path.display()
        )
    }
}

/// Copy `source` into `target_directory/<source base name>`.
///
/// No fingerprint check is made; deciding whether a sync is needed is the
/// caller's job.
///
/// # Errors
///
/// Returns [`SyncError::InvalidSource`] if `source` has no base name,
/// [`SyncError::Overlap`] if the album folder under the target resolves to
/// the source or a folder inside it, [`SyncError::CreateTarget`] if the album folder cannot be created, and
/// [`SyncError::Copy`] on the first walk or copy failure.
pub fn sync_album(
    source: &Path,
    target_directory: &Path,
    progress: Option<&dyn ProgressCallback>,
) -> Result<SyncOutcome, SyncError> {
    let album_name = source
        .file_name()
        .ok_or_else(|| SyncError::InvalidSource(source.to_path_buf()))?;
    let target_path = target_directory.join(album_name);
    ensure_disjoint(source, &target_path)?;

    log::info!(
        "Syncing {} -> {}",
        source.display(),
        target_path.display()
    );

    fs::create_dir_all(&target_path).map_err(|e| SyncError::CreateTarget {
        path: target_path.clone(),
        source: e,
    })?;

    if let Some(cb) = progress {
        cb.on_phase_start(PHASE_COPY, 0);
    }
    let result = copy_directory(source, &target_path, progress);
    if let Some(cb) = progress {
        cb.on_phase_end(PHASE_COPY);
    }
    let (files_copied, directories, bytes_copied) = result?;

    let outcome = SyncOutcome {
        album_name: album_name.to_string_lossy().into_owned(),
        target_path,
        files_copied,
        directories,
        bytes_copied,
    };
    log::info!(
        "Synced {} ({} files, {} bytes)",
        outcome.album_name,
        outcome.files_copied,
        outcome.bytes_copied
    );
    Ok(outcome)
}

/// Recursively mirror `src` into `dst`, returning (files, directories, bytes).
fn copy_directory(
    src: &Path,
    dst: &Path,
    progress: Option<&dyn ProgressCallback>,
) -> Result<(usize, usize, u64), SyncError> {
    let mut files = 0usize;
    let mut directories = 0usize;
    let mut bytes = 0u64;

    for entry in WalkDir::new(src).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| SyncError::Copy {
            path: e.path().map_or_else(|| src.to_path_buf(), Path::to_path_buf),
            source: io::Error::from(e),
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| SyncError::Copy {
                path: entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "entry outside source root"),
            })?;
        let destination = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).map_err(|e| SyncError::Copy {
                path: destination.clone(),
                source: e,
            })?;
            directories += 1;
            continue;
        }

        bytes += copy_file(entry.path(), &destination)?;
        files += 1;
        log::trace!("Copied {}", destination.display());

        if let Some(cb) = progress {
            cb.on_progress(files, &entry.path().to_string_lossy());
        }
    }

    Ok((files, directories, bytes))
}

/// Resolve `path` through its nearest existing ancestor, so targets that do
/// not exist yet still compare against canonical source paths.
fn resolve_lenient(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = fs::canonicalize(existing) {
            return missing.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Refuse a target album folder that is the source or lies inside it.
///
/// A source that cannot be resolved is let through; the walk reports it.
fn ensure_disjoint(source: &Path, target_path: &Path) -> Result<(), SyncError> {
    let Ok(source_real) = fs::canonicalize(source) else {
        return Ok(());
    };
    let target_real = resolve_lenient(target_path);
    if target_real.starts_with(&source_real) {
        log::warn!(
            "Refusing to sync {} onto {}",
            source.display(),
            target_path.display()
        );
        return Err(SyncError::Overlap {
            album: source.to_path_buf(),
            target: target_path.to_path_buf(),
        });
    }
    Ok(())
}

/// Copy one file's bytes, truncating any existing destination.
///
/// Permissions are not carried over so a later re-sync can always overwrite.
fn copy_file(from: &Path, to: &Path) -> Result<u64, SyncError> {
    let mut reader = File::open(from).map_err(|e| SyncError::Copy {
        path: from.to_path_buf(),
        source: e,
    })?;
    let mut writer = File::create(to).map_err(|e| SyncError::Copy {
        path: to.to_path_buf(),
        source: e,
    })?;
    io::copy(&mut reader, &mut writer).map_err(|e| SyncError::Copy {
        path: to.to_path_buf(),
        source: e,
    })
}
