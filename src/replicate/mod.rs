//! Album replication between directories.
//!
//! This module provides the two filesystem mutations behind syncing:
//! - [`sync_album`]: recursive copy of an album folder into a target directory
//! - [`unsync_album`]: recursive removal of a named folder from a target directory
//!
//! Neither operation consults fingerprints and neither takes any lock. Two
//! concurrent operations on overlapping paths are not coordinated; the last
//! writer wins.
//!
//! ```no_run
//! use albumsync::replicate::{sync_album, unsync_album};
//! use std::path::Path;
//!
//! let target = Path::new("/media/player/Music");
//! sync_album(Path::new("/music/Abbey Road"), target, None)?;
//! unsync_album(target, "Abbey Road")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod copy;
pub mod remove;

// Re-export commonly used types
pub use copy::{sync_album, SyncError, SyncOutcome};
pub use remove::{unsync_album, UnsyncError, UnsyncOutcome};
