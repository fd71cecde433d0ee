//! Directory fingerprinting.
//!
//! # Overview
//!
//! A directory fingerprint is a SHA-256 digest over the directory's own base
//! name and the sorted names of its immediate (non-directory) entries:
//!
//! ```text
//! sha256("<base name>|<file 1>|<file 2>|...")
//! ```
//!
//! File contents and nested subdirectories never influence the digest, so
//! the fingerprint is an identity proxy for an album folder rather than a
//! true content hash. Two folders with the same name and the same file
//! listing fingerprint identically wherever they live on disk.
//!
//! # Caching
//!
//! [`Fingerprinter`] consults a shared [`FingerprintCache`] before touching
//! the filesystem and memoizes every successful result keyed by the exact
//! path it was given. Entries are never refreshed automatically: if a folder
//! changes after it was cached, the stale digest is returned until the entry
//! is removed or the cache is cleared.
//!
//! # Example
//!
//! ```no_run
//! use albumsync::fingerprint::{FingerprintCache, Fingerprinter};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let fingerprinter = Fingerprinter::new(Arc::new(FingerprintCache::new()));
//! match fingerprinter.fingerprint(Path::new("/music/Abbey Road")) {
//!     Ok(fp) => println!("{}", fp),
//!     Err(e) => eprintln!("Warning: {}", e),
//! }
//! ```

pub mod cache;

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use cache::{CacheStats, FingerprintCache};

/// Separator placed between the folder name and each file name before hashing.
pub const FINGERPRINT_SEPARATOR: &[u8] = b"|";

/// Length of a fingerprint in hexadecimal characters (256-bit digest).
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// A lowercase hexadecimal SHA-256 directory fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fingerprint, returning the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur while listing a directory for fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum FingerprintError {
    /// The directory does not exist.
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when listing the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure while enumerating entries.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Directory being listed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl FingerprintError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Compute the fingerprint of `path` without consulting any cache.
///
/// Subdirectories are discarded; every other immediate entry (regular files,
/// symlinks, special files) contributes its name. Names are sorted byte-wise
/// before hashing. An empty directory hashes its base name alone.
///
/// # Errors
///
/// Returns a [`FingerprintError`] if the directory cannot be listed or any of
/// its entries cannot be read.
pub fn compute_fingerprint(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let read_dir = fs::read_dir(path).map_err(|e| FingerprintError::from_io(path, e))?;

    let mut files: Vec<OsString> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| FingerprintError::from_io(path, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| FingerprintError::from_io(path, e))?;
        if !file_type.is_dir() {
            files.push(entry.file_name());
        }
    }
    files.sort();

    let folder_name = path.file_name().unwrap_or(path.as_os_str());

    let mut hasher = Sha256::new();
    hasher.update(folder_name.as_encoded_bytes());
    hasher.update(FINGERPRINT_SEPARATOR);
    for (i, name) in files.iter().enumerate() {
        if i > 0 {
            hasher.update(FINGERPRINT_SEPARATOR);
        }
        hasher.update(name.as_encoded_bytes());
    }

    Ok(Fingerprint(format!("{:x}", hasher.finalize())))
}

/// Cache-aware fingerprint computation.
///
/// Cloning a `Fingerprinter` is cheap; clones share the same cache.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    cache: Arc<FingerprintCache>,
}

impl Fingerprinter {
    /// Create a fingerprinter backed by the given cache.
    #[must_use]
    pub fn new(cache: Arc<FingerprintCache>) -> Self {
        Self { cache }
    }

    /// The cache this fingerprinter reads from and writes to.
    #[must_use]
    pub fn cache(&self) -> &Arc<FingerprintCache> {
        &self.cache
    }

    /// Fingerprint `path`, returning a cached value when one exists.
    ///
    /// The cache lock is never held while the directory is being listed, so
    /// two threads asking for the same uncached path may both compute it.
    /// Failures are not cached.
    ///
    /// # Errors
    ///
    /// Returns a [`FingerprintError`] if the directory cannot be listed.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, FingerprintError> {
        if let Some(cached) = self.cache.get(path) {
            log::trace!("Fingerprint cache hit: {}", path.display());
            return Ok(cached);
        }

        log::trace!("Fingerprint cache miss: {}", path.display());
        let fingerprint = compute_fingerprint(path)?;
        Ok(self.cache.insert(path, fingerprint))
    }

    /// Fingerprint `path`, degrading any failure to an empty string.
    ///
    /// An empty string means "fingerprint unavailable" and never equals a
    /// real digest.
    #[must_use]
    pub fn fingerprint_or_empty(&self, path: &Path) -> String {
        match self.fingerprint(path) {
            Ok(fp) => fp.into_string(),
            Err(e) => {
                log::debug!("Fingerprint unavailable: {}", e);
                String::new()
            }
        }
    }
}
