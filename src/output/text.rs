//! Plain text output for terminals.

use std::fmt::Write as _;

use bytesize::ByteSize;

use crate::library::AlbumFolder;

/// One line per album: status marker, artist/album, counts, size, path.
#[must_use]
pub fn format_album(album: &AlbumFolder) -> String {
    let marker = if album.is_synced { "[synced]" } else { "[      ]" };
    let cover = if album.has_cover { ", cover" } else { "" };
    format!(
        "{} {} - {} ({} audio, {}{}) {}",
        marker,
        album.artist,
        album.album,
        album.audio_count,
        ByteSize::b(album.size_bytes),
        cover,
        album.path.display()
    )
}

/// Render a scan as text with a trailing summary line.
#[must_use]
pub fn format_albums(albums: &[AlbumFolder]) -> String {
    let mut out = String::new();
    for album in albums {
        let _ = writeln!(out, "{}", format_album(album));
    }

    let synced = albums.iter().filter(|a| a.is_synced).count();
    let total: u64 = albums.iter().map(|a| a.size_bytes).sum();
    let _ = write!(
        out,
        "{} album(s), {} synced, {} total",
        albums.len(),
        synced,
        ByteSize::b(total)
    );
    out
}
