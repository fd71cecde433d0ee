//! The album sync service.
//!
//! [`SyncService`] owns the fingerprint cache and exposes the operations a
//! front end needs: fingerprinting, sync-status checks, sync, unsync, and
//! library scans. It is `Send + Sync`; share one instance behind an `Arc`
//! across request threads so they all benefit from the same cache.
//!
//! The cache is the only state the service keeps. Sync and unsync do not
//! touch it, so a folder fingerprinted before it was modified keeps its old
//! digest until [`SyncService::clear_cache`] is called or the process exits.
//!
//! # Example
//!
//! ```no_run
//! use albumsync::config::Config;
//! use albumsync::service::SyncService;
//! use std::path::Path;
//!
//! let service = SyncService::new(Config::default());
//! let source = Path::new("/music/Abbey Road");
//! let target = Path::new("/media/player");
//!
//! if !service.check_sync(source, target).synced {
//!     let done = service.sync(source, target, None)?;
//!     println!("{}", done.result);
//! }
//! # Ok::<(), albumsync::replicate::SyncError>(())
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::fingerprint::{FingerprintCache, Fingerprinter};
use crate::library::{scan_albums, AlbumFolder};
use crate::progress::ProgressCallback;
use crate::replicate::{sync_album, unsync_album, SyncError, UnsyncError};
use crate::status::SyncStatusResolver;

/// Answer to a sync-status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Whether a fingerprint twin of the source exists in the target.
    pub synced: bool,
}

/// Message returned by a successful sync or unsync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Human-readable summary.
    pub result: String,
}

/// Cache-owning entry point for all album operations.
#[derive(Debug)]
pub struct SyncService {
    config: Config,
    resolver: SyncStatusResolver,
}

impl SyncService {
    /// Create a service with a fresh, empty cache.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_cache(config, Arc::new(FingerprintCache::new()))
    }

    /// Create a service around an existing cache.
    #[must_use]
    pub fn with_cache(config: Config, cache: Arc<FingerprintCache>) -> Self {
        Self {
            config,
            resolver: SyncStatusResolver::new(Fingerprinter::new(cache)),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared fingerprint cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<FingerprintCache> {
        self.resolver.fingerprinter().cache()
    }

    /// Forget every cached fingerprint.
    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    /// Fingerprint `path`; an empty string means it could not be read.
    #[must_use]
    pub fn compute_fingerprint(&self, path: &Path) -> String {
        self.resolver.fingerprinter().fingerprint_or_empty(path)
    }

    /// Whether `source_path` has a fingerprint twin among the immediate
    /// subfolders of `target_directory`.
    #[must_use]
    pub fn check_sync(&self, source_path: &Path, target_directory: &Path) -> SyncStatus {
        SyncStatus {
            synced: self.resolver.is_synced(source_path, target_directory),
        }
    }

    /// Copy `source_path` into `target_directory/<source base name>`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on the first failure; files copied before it
    /// remain in place.
    pub fn sync(
        &self,
        source_path: &Path,
        target_directory: &Path,
        progress: Option<&dyn ProgressCallback>,
    ) -> Result<OperationResult, SyncError> {
        let outcome = sync_album(source_path, target_directory, progress)?;
        Ok(OperationResult {
            result: outcome.message(),
        })
    }

    /// Delete `target_directory/<album_name>` recursively.
    ///
    /// # Errors
    ///
    /// Returns [`UnsyncError::NotFound`] if the album does not exist, and
    /// other [`UnsyncError`] variants for invalid names or failed deletes.
    pub fn unsync(
        &self,
        target_directory: &Path,
        album_name: &str,
    ) -> Result<OperationResult, UnsyncError> {
        let outcome = unsync_album(target_directory, album_name)?;
        Ok(OperationResult {
            result: outcome.message(),
        })
    }

    /// Scan `directory` for albums, resolving sync status against `target`.
    #[must_use]
    pub fn scan(
        &self,
        directory: &Path,
        target: Option<&Path>,
        progress: Option<&dyn ProgressCallback>,
    ) -> Vec<AlbumFolder> {
        scan_albums(directory, target, &self.config, &self.resolver, progress)
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
