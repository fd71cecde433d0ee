//! In-memory fingerprint cache.
//!
//! Maps the exact path string a caller supplied to the fingerprint computed
//! for it. No normalization is applied: `/music/A` and `/music/./A` are two
//! different keys. Entries live until removed, cleared, or the process exits.
//!
//! The map sits behind a reader/writer lock. Lookups take the shared lock,
//! inserts take the exclusive lock, and neither is held while a directory is
//! being read.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::Fingerprint;

/// Hit/miss counters for a [`FingerprintCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found no entry
    pub misses: u64,
}

/// Thread-safe path-keyed fingerprint cache.
#[derive(Debug, Default)]
pub struct FingerprintCache {
    entries: RwLock<HashMap<OsString, Fingerprint>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FingerprintCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the fingerprint cached for `path`.
    pub fn get(&self, path: &Path) -> Option<Fingerprint> {
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_os_str())
            .cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Cache `fingerprint` for `path` and return the value now stored.
    ///
    /// An existing entry is never overwritten: if another thread inserted
    /// first, its value is kept and returned.
    pub fn insert(&self, path: &Path, fingerprint: Fingerprint) -> Fingerprint {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.as_os_str().to_os_string())
            .or_insert(fingerprint)
            .clone()
    }

    /// Drop the entry for `path`, returning it if present.
    pub fn remove(&self, path: &Path) -> Option<Fingerprint> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path.as_os_str())
    }

    /// Drop every entry. Counters are left untouched.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("Clearing fingerprint cache ({} entries)", entries.len());
        entries.clear();
    }

    /// Number of cached fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
