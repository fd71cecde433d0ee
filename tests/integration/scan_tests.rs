use albumsync::config::Config;
use albumsync::library::UNKNOWN_ARTIST;
use albumsync::service::SyncService;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, files: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for f in files {
        File::create(dir.join(f)).unwrap();
    }
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let service = SyncService::default();

    assert!(service.scan(dir.path(), None, None).is_empty());
}

#[test]
fn test_scan_missing_directory() {
    let dir = tempdir().unwrap();
    let service = SyncService::default();

    assert!(service.scan(&dir.path().join("nope"), None, None).is_empty());
}

#[test]
fn test_scan_library_layout() {
    let dir = tempdir().unwrap();
    let music = dir.path().join("Music");
    touch(&music.join("Beatles/Help"), &["01.mp3", "02.flac", "notes.txt"]);
    touch(&music.join("Loose"), &["a.ogg"]);
    touch(&music.join("Beatles/Scans"), &["front.png"]);
    File::create(music.join("Beatles/Help/cover.jpg"))
        .unwrap()
        .write_all(b"0123456789")
        .unwrap();

    let service = SyncService::default();
    let albums = service.scan(&music, None, None);

    // Sorted walk order: Beatles/Help before Loose; Scans holds no audio
    assert_eq!(albums.len(), 2);

    let help = &albums[0];
    assert_eq!(help.name, "Help");
    assert_eq!(help.artist, "Beatles");
    assert_eq!(help.album, "Help");
    assert_eq!(help.mp3_count, 1);
    assert_eq!(help.audio_count, 2);
    assert!(help.has_cover);
    assert_eq!(help.size_bytes, 10);
    assert_eq!(help.fingerprint, service.compute_fingerprint(&help.path));
    assert!(!help.is_synced);

    let loose = &albums[1];
    assert_eq!(loose.name, "Loose");
    assert_eq!(loose.artist, UNKNOWN_ARTIST);
    assert!(!loose.has_cover);
}

#[test]
fn test_scan_resolves_sync_status_against_target() {
    let dir = tempdir().unwrap();
    let library = dir.path().join("lib");
    let target = dir.path().join("player");
    touch(&library.join("Artist/Synced"), &["1.mp3", "2.mp3"]);
    touch(&library.join("Artist/Pending"), &["1.mp3"]);
    touch(&target.join("Synced"), &["1.mp3", "2.mp3"]);

    let service = SyncService::default();
    let albums = service.scan(&library, Some(&target), None);

    let status: Vec<(&str, bool)> = albums
        .iter()
        .map(|a| (a.name.as_str(), a.is_synced))
        .collect();
    assert_eq!(status, vec![("Pending", false), ("Synced", true)]);
}

#[test]
fn test_scan_with_dedicated_thread_pool_keeps_order() {
    let dir = tempdir().unwrap();
    for i in 0..12 {
        touch(&dir.path().join(format!("Album {:02}", i)), &["t.mp3"]);
    }

    let config = Config {
        threads: 2,
        ..Config::default()
    };
    let service = SyncService::new(config);
    let names: Vec<String> = service
        .scan(dir.path(), None, None)
        .into_iter()
        .map(|a| a.name)
        .collect();

    let expected: Vec<String> = (0..12).map(|i| format!("Album {:02}", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_scan_custom_extensions() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("Opus"), &["a.opus", "b.OPUS"]);

    let default_scan = SyncService::default().scan(dir.path(), None, None);
    assert!(default_scan.is_empty());

    let config = Config {
        audio_extensions: vec!["opus".to_string()],
        ..Config::default()
    };
    let albums = SyncService::new(config).scan(dir.path(), None, None);
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].audio_count, 2);
    assert_eq!(albums[0].mp3_count, 0);
}
