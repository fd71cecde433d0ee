use albumsync::fingerprint::{compute_fingerprint, FINGERPRINT_HEX_LEN};
use albumsync::service::SyncService;
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn test_empty_folders_with_different_names() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("EmptyFolder");
    let b = dir.path().join("AnotherEmptyFolder");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();

    let service = SyncService::default();
    let fa = service.compute_fingerprint(&a);
    let fb = service.compute_fingerprint(&b);

    assert!(!fa.is_empty());
    assert!(!fb.is_empty());
    assert_ne!(fa, fb);
}

#[test]
fn test_same_listing_in_different_parents_matches() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("lib/Beatles/Help");
    let b = dir.path().join("player/Help");
    for album in [&a, &b] {
        fs::create_dir_all(album).unwrap();
        File::create(album.join("01.mp3")).unwrap();
        File::create(album.join("02.mp3")).unwrap();
    }
    fs::write(b.join("02.mp3"), b"different bytes").unwrap();

    let service = SyncService::default();
    assert_eq!(
        service.compute_fingerprint(&a),
        service.compute_fingerprint(&b)
    );
}

#[test]
fn test_missing_folder_yields_empty_sentinel() {
    let dir = tempdir().unwrap();
    let service = SyncService::default();

    assert_eq!(service.compute_fingerprint(&dir.path().join("gone")), "");
    assert!(compute_fingerprint(&dir.path().join("gone")).is_err());
    // Failures are not cached
    assert!(service.cache().is_empty());
}

#[test]
fn test_cache_returns_stale_value_until_cleared() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("Album");
    fs::create_dir(&album).unwrap();
    File::create(album.join("a.mp3")).unwrap();

    let service = SyncService::default();
    let first = service.compute_fingerprint(&album);
    assert_eq!(first.len(), FINGERPRINT_HEX_LEN);

    File::create(album.join("b.mp3")).unwrap();
    assert_eq!(service.compute_fingerprint(&album), first);
    assert_eq!(service.compute_fingerprint(&album), first);

    service.clear_cache();
    let fresh = service.compute_fingerprint(&album);
    assert_ne!(fresh, first);
    assert_eq!(fresh, compute_fingerprint(&album).unwrap().into_string());
}

#[test]
fn test_cache_counts_hits_and_misses() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("Album");
    fs::create_dir(&album).unwrap();

    let service = SyncService::default();
    service.compute_fingerprint(&album);
    service.compute_fingerprint(&album);
    service.compute_fingerprint(&album);

    let stats = service.cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(service.cache().len(), 1);
}
