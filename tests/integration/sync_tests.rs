use albumsync::replicate::{SyncError, UnsyncError};
use albumsync::service::SyncService;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn make_test_album(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    File::create(dir.join("track1.mp3"))
        .unwrap()
        .write_all(b"first track")
        .unwrap();
    File::create(dir.join("track2.mp3"))
        .unwrap()
        .write_all(b"second track")
        .unwrap();
    File::create(dir.join("cover.jpg"))
        .unwrap()
        .write_all(b"jpeg")
        .unwrap();
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_sync_copies_album_and_marks_synced() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("library/TestAlbum");
    let target = dir.path().join("target");
    make_test_album(&source);
    fs::create_dir(&target).unwrap();

    let service = SyncService::default();
    assert!(!service.check_sync(&source, &target).synced);

    let result = service.sync(&source, &target, None).unwrap();
    assert_eq!(
        result.result,
        format!("Successfully synced TestAlbum to {}", target.join("TestAlbum").display())
    );

    let copy = target.join("TestAlbum");
    assert_eq!(listing(&copy), listing(&source));
    for name in ["track1.mp3", "track2.mp3", "cover.jpg"] {
        assert_eq!(
            fs::read(copy.join(name)).unwrap(),
            fs::read(source.join(name)).unwrap()
        );
    }
    assert!(service.check_sync(&source, &target).synced);
}

#[test]
fn test_extra_file_in_copy_breaks_sync_after_cache_clear() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("library/TestAlbum");
    let target = dir.path().join("target");
    make_test_album(&source);
    fs::create_dir(&target).unwrap();

    let service = SyncService::default();
    service.sync(&source, &target, None).unwrap();
    assert!(service.check_sync(&source, &target).synced);

    File::create(target.join("TestAlbum/bonus_track.mp3")).unwrap();
    service.clear_cache();

    assert!(!service.check_sync(&source, &target).synced);
}

#[test]
fn test_sync_nested_folders() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Box Set");
    let target = dir.path().join("target");
    make_test_album(&source.join("Disc 1"));
    make_test_album(&source.join("Disc 2"));
    fs::create_dir(source.join("Disc 2/Scans")).unwrap();

    let service = SyncService::default();
    service.sync(&source, &target, None).unwrap();

    assert!(target.join("Box Set/Disc 1/track1.mp3").is_file());
    assert!(target.join("Box Set/Disc 2/cover.jpg").is_file());
    assert!(target.join("Box Set/Disc 2/Scans").is_dir());
    assert!(service.check_sync(&source, &target).synced);
}

#[test]
fn test_sync_missing_source_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    fs::create_dir(&target).unwrap();

    let service = SyncService::default();
    let err = service
        .sync(&dir.path().join("Nope"), &target, None)
        .unwrap_err();
    assert!(matches!(err, SyncError::Copy { .. }));
    // Fail fast: the album folder created before the walk is left behind
    assert!(target.join("Nope").is_dir());
}

#[test]
fn test_sync_source_without_base_name_fails() {
    let dir = tempdir().unwrap();
    let service = SyncService::default();

    let err = service.sync(Path::new("/"), dir.path(), None).unwrap_err();
    assert!(matches!(err, SyncError::InvalidSource(_)));
}

#[test]
fn test_unsync_removes_album() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    make_test_album(&target.join("TestAlbum"));
    make_test_album(&target.join("Other"));

    let service = SyncService::default();
    let result = service.unsync(&target, "TestAlbum").unwrap();

    assert_eq!(result.result, "Successfully removed TestAlbum");
    assert!(!target.join("TestAlbum").exists());
    assert!(target.join("Other/track1.mp3").exists());
}

#[test]
fn test_unsync_missing_album_leaves_target_unchanged() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    make_test_album(&target.join("Keep"));
    let before = listing(&target);

    let service = SyncService::default();
    let err = service.unsync(&target, "Missing").unwrap_err();

    assert!(matches!(err, UnsyncError::NotFound { .. }));
    assert_eq!(listing(&target), before);
    assert_eq!(listing(&target.join("Keep")).len(), 3);
}

#[test]
fn test_unsync_rejects_path_escapes() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    make_test_album(&target.join("Keep"));

    let service = SyncService::default();
    for name in ["", "..", "Keep/track1.mp3", "/etc"] {
        let err = service.unsync(&target, name).unwrap_err();
        assert!(matches!(err, UnsyncError::InvalidName(_)), "{name:?}");
    }
    assert!(target.join("Keep/track1.mp3").exists());
}

#[test]
fn test_sync_aborts_mid_walk_and_converges_on_retry() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("library/TestAlbum");
    let target = dir.path().join("target");
    make_test_album(&source);

    // A directory where track1.mp3 must go; the sorted walk copies
    // cover.jpg first and then fails on track1.mp3
    let obstacle = target.join("TestAlbum/track1.mp3");
    fs::create_dir_all(&obstacle).unwrap();

    let service = SyncService::default();
    let err = service.sync(&source, &target, None).unwrap_err();

    match &err {
        SyncError::Copy { path, .. } => assert_eq!(path, &obstacle),
        other => panic!("Expected Copy error, got {:?}", other),
    }
    let copy = target.join("TestAlbum");
    assert_eq!(fs::read(copy.join("cover.jpg")).unwrap(), b"jpeg");
    assert!(!copy.join("track2.mp3").exists());

    fs::remove_dir(&obstacle).unwrap();
    service.sync(&source, &target, None).unwrap();

    assert_eq!(listing(&copy), listing(&source));
    assert_eq!(fs::read(copy.join("track2.mp3")).unwrap(), b"second track");
    assert!(service.check_sync(&source, &target).synced);
}

#[test]
fn test_sync_into_own_parent_is_refused() {
    let dir = tempdir().unwrap();
    let library = dir.path().join("Music");
    let album = library.join("TestAlbum");
    make_test_album(&album);

    let service = SyncService::default();
    let err = service.sync(&album, &library, None).unwrap_err();

    assert!(matches!(err, SyncError::Overlap { .. }));
    assert_eq!(fs::read(album.join("track1.mp3")).unwrap(), b"first track");
    assert_eq!(fs::read(album.join("track2.mp3")).unwrap(), b"second track");
}

#[cfg(unix)]
#[test]
fn test_unsync_in_read_only_target_reports_remove_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    make_test_album(&target.join("Locked"));
    fs::set_permissions(&target, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions
    let writable = File::create(target.join("write-check")).is_ok();
    if writable {
        let _ = fs::remove_file(target.join("write-check"));
        fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = SyncService::default().unsync(&target, "Locked");
    fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(UnsyncError::Remove { path, .. }) => assert_eq!(path, target.join("Locked")),
        other => panic!("Expected Remove error, got {:?}", other),
    }
    assert!(target.join("Locked").is_dir());
}
