//! Library walk producing album records.
//!
//! Every folder below the scan root that directly holds at least one audio
//! file becomes an [`AlbumFolder`]. The walk itself is sequential and sorted
//! by name; building the records (listing, sizing, fingerprinting, sync
//! checks) runs on a rayon pool and keeps walk order.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::naming::parse_artist_and_album;
use super::{find_cover_image, folder_size, AlbumFolder};
use crate::config::Config;
use crate::progress::{ProgressCallback, PHASE_SCAN};
use crate::status::SyncStatusResolver;

/// Audio file tallies for one folder's immediate entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioCounts {
    /// Files ending in `.mp3`
    pub mp3: usize,
    /// Files matching any audio extension, `.mp3` included
    pub audio: usize,
}

/// Lowercase the configured extensions and give each a leading dot.
fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e))
        .collect()
}

/// Count audio files among the immediate entries of `dir`.
///
/// Returns `None` if the folder cannot be listed.
fn count_audio(dir: &Path, extensions: &[String]) -> Option<AudioCounts> {
    let entries = fs::read_dir(dir).ok()?;
    let mut counts = AudioCounts::default();

    for entry in entries.flatten() {
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(".mp3") {
            counts.mp3 += 1;
            counts.audio += 1;
        } else if extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            counts.audio += 1;
        }
    }

    Some(counts)
}

fn build_record(
    dir: &Path,
    target: Option<&Path>,
    config: &Config,
    extensions: &[String],
    resolver: &SyncStatusResolver,
) -> Option<AlbumFolder> {
    let counts = count_audio(dir, extensions)?;
    if counts.audio == 0 {
        return None;
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent_name = dir
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (artist, album) = parse_artist_and_album(&parent_name, &name, &config.root_folder_names);

    Some(AlbumFolder {
        path: dir.to_path_buf(),
        name,
        artist,
        album,
        mp3_count: counts.mp3,
        audio_count: counts.audio,
        has_cover: find_cover_image(dir, &config.cover_file_name).is_some(),
        size_bytes: folder_size(dir),
        fingerprint: resolver.fingerprinter().fingerprint_or_empty(dir),
        is_synced: target.is_some_and(|t| resolver.is_synced(dir, t)),
    })
}

/// Scan `directory` for album folders.
///
/// When `target` is given, each record's `is_synced` flag is resolved
/// against it; otherwise every record reports `false`. A missing or
/// unreadable root yields an empty list.
pub fn scan_albums(
    directory: &Path,
    target: Option<&Path>,
    config: &Config,
    resolver: &SyncStatusResolver,
    progress: Option<&dyn ProgressCallback>,
) -> Vec<AlbumFolder> {
    if !directory.is_dir() {
        log::warn!("Cannot scan {}: not a readable directory", directory.display());
        return Vec::new();
    }

    let candidates: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                log::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect();

    let extensions = normalize_extensions(&config.audio_extensions);
    let processed = AtomicUsize::new(0);

    if let Some(cb) = progress {
        cb.on_phase_start(PHASE_SCAN, candidates.len());
    }

    let build_all = || -> Vec<AlbumFolder> {
        candidates
            .par_iter()
            .filter_map(|dir| {
                let record = build_record(dir, target, config, &extensions, resolver);
                if let Some(cb) = progress {
                    let current = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    cb.on_progress(current, &dir.to_string_lossy());
                }
                record
            })
            .collect()
    };

    let albums = if config.threads > 0 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
        {
            Ok(pool) => pool.install(build_all),
            Err(e) => {
                log::warn!("Failed to build scan thread pool, using global pool: {}", e);
                build_all()
            }
        }
    } else {
        build_all()
    };

    if let Some(cb) = progress {
        cb.on_phase_end(PHASE_SCAN);
    }

    log::info!(
        "Scanned {}: {} folders, {} albums",
        directory.display(),
        candidates.len(),
        albums.len()
    );
    albums
}
