//! Artist and album names from folder layout.
//!
//! Tried in order:
//! 1. `Artist/Album/` - the parent folder is the artist, unless it is a
//!    library root such as `Music`
//! 2. `Artist - Album`, then `Artist-Album`, then `Artist_Album` in the
//!    album folder name
//! 3. Unknown artist, folder name as album

/// Artist reported when no heuristic applies.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Whether `folder_name` is one of `root_names`, ignoring case.
#[must_use]
pub fn is_root_level_folder(folder_name: &str, root_names: &[String]) -> bool {
    root_names
        .iter()
        .any(|root| root.to_lowercase() == folder_name.to_lowercase())
}

fn split_once_trimmed<'a>(name: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let (artist, album) = name.split_once(separator)?;
    let (artist, album) = (artist.trim(), album.trim());
    if artist.is_empty() || album.is_empty() {
        None
    } else {
        Some((artist, album))
    }
}

/// Derive `(artist, album)` for an album folder.
#[must_use]
pub fn parse_artist_and_album(
    parent_folder_name: &str,
    album_folder_name: &str,
    root_names: &[String],
) -> (String, String) {
    if !parent_folder_name.is_empty() && !is_root_level_folder(parent_folder_name, root_names) {
        return (
            parent_folder_name.to_string(),
            album_folder_name.to_string(),
        );
    }

    for separator in [" - ", "-", "_"] {
        if let Some((artist, album)) = split_once_trimmed(album_folder_name, separator) {
            return (artist.to_string(), album.to_string());
        }
    }

    (UNKNOWN_ARTIST.to_string(), album_folder_name.to_string())
}
