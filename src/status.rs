//! Sync-status resolution by fingerprint matching.
//!
//! A source album counts as synced into a target directory when one of the
//! target's immediate subfolders carries the same fingerprint. Folder names
//! are never compared directly: a same-named folder with a different file
//! listing does not match, and since the fingerprint covers the base name,
//! a renamed copy does not match either unless its digest happens to agree.
//!
//! Subfolders are visited in whatever order the filesystem lists them and the
//! first match wins. Fingerprint uniqueness among siblings is not checked.

use std::fs;
use std::path::{Path, PathBuf};

use crate::fingerprint::Fingerprinter;

/// Decides whether a source folder has a fingerprint twin under a target.
#[derive(Debug, Clone)]
pub struct SyncStatusResolver {
    fingerprinter: Fingerprinter,
}

impl SyncStatusResolver {
    /// Create a resolver that fingerprints through `fingerprinter`.
    #[must_use]
    pub fn new(fingerprinter: Fingerprinter) -> Self {
        Self { fingerprinter }
    }

    /// The fingerprinter used for both sources and target subfolders.
    #[must_use]
    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    /// Find the first immediate subfolder of `target_directory` whose
    /// fingerprint equals `fingerprint`.
    ///
    /// An unreadable target yields `None`. Subfolders that cannot be
    /// fingerprinted are skipped.
    pub fn find_match(&self, target_directory: &Path, fingerprint: &str) -> Option<PathBuf> {
        if fingerprint.is_empty() {
            return None;
        }

        let entries = match fs::read_dir(target_directory) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!(
                    "Cannot list target directory {}: {}",
                    target_directory.display(),
                    e
                );
                return None;
            }
        };

        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            let candidate = target_directory.join(entry.file_name());
            if self.fingerprinter.fingerprint_or_empty(&candidate) == fingerprint {
                log::debug!("Fingerprint match: {}", candidate.display());
                return Some(candidate);
            }
        }

        None
    }

    /// Locate the folder under `target_directory` that `source_path` is
    /// synced to, if any. An unreadable source never matches.
    pub fn synced_copy(&self, source_path: &Path, target_directory: &Path) -> Option<PathBuf> {
        let source_fingerprint = self.fingerprinter.fingerprint_or_empty(source_path);
        if source_fingerprint.is_empty() {
            return None;
        }
        self.find_match(target_directory, &source_fingerprint)
    }

    /// Whether `source_path` has a fingerprint match under `target_directory`.
    #[must_use]
    pub fn is_synced(&self, source_path: &Path, target_directory: &Path) -> bool {
        self.synced_copy(source_path, target_directory).is_some()
    }
}
