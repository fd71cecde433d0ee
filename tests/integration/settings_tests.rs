use albumsync::cli::Cli;
use albumsync::config::Settings;
use albumsync::error::ExitCode;
use albumsync::run_app;
use clap::Parser;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn run(config_dir: &Path, args: &[&str]) -> anyhow::Result<ExitCode> {
    let config = config_dir.join("config.toml");
    let mut argv = vec![
        "albumsync".to_string(),
        "-q".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_string()));
    run_app(Cli::try_parse_from(argv).unwrap())
}

fn make_album(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    File::create(dir.join("track1.mp3")).unwrap();
}

#[test]
fn test_sync_remembers_target_for_check() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("config");
    let source = dir.path().join("lib/Album");
    let target = dir.path().join("target");
    make_album(&source);
    fs::create_dir(&target).unwrap();

    let code = run(
        &config_dir,
        &["sync", source.to_str().unwrap(), "--target", target.to_str().unwrap()],
    )
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let settings = Settings::load(&config_dir.join("settings.json"));
    assert_eq!(settings.last_target_directory.as_deref(), Some(target.as_path()));
    assert_eq!(
        settings.last_source_directory.as_deref(),
        Some(dir.path().join("lib").as_path())
    );

    let code = run(&config_dir, &["check", source.to_str().unwrap()]).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_check_reports_not_synced() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Album");
    let target = dir.path().join("target");
    make_album(&source);
    fs::create_dir(&target).unwrap();

    let code = run(
        dir.path(),
        &["check", source.to_str().unwrap(), "-t", target.to_str().unwrap()],
    )
    .unwrap();
    assert_eq!(code, ExitCode::NotSynced);
}

#[test]
fn test_check_without_any_target_fails() {
    let dir = tempdir().unwrap();
    let err = run(dir.path(), &["check", "/music/Album"]).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_unsync_missing_album_maps_to_not_found() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    fs::create_dir(&target).unwrap();

    let err = run(dir.path(), &["unsync", "Ghost", "-t", target.to_str().unwrap()]).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::NotFound);
    assert!(format!("{:#}", err).contains("album Ghost not found in target directory"));
}

#[test]
fn test_settings_set_and_clear() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");

    run(dir.path(), &["settings", "set", "--source", "/music", "--target", "/media"]).unwrap();
    let settings = Settings::load(&settings_path);
    assert_eq!(settings.last_source_directory.as_deref(), Some(Path::new("/music")));
    assert_eq!(settings.last_target_directory.as_deref(), Some(Path::new("/media")));

    let raw = fs::read_to_string(&settings_path).unwrap();
    assert!(raw.contains("lastSourceDirectory"));
    assert!(raw.contains("lastTargetDirectory"));

    run(dir.path(), &["settings", "clear"]).unwrap();
    assert_eq!(Settings::load(&settings_path), Settings::default());
}

#[test]
fn test_config_file_changes_cover_name() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("Album");
    make_album(&album);
    File::create(album.join("folder.jpg")).unwrap();

    let err = run(dir.path(), &["cover", album.to_str().unwrap()]).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::NotFound);
    assert!(err.to_string().starts_with("cover image cover.jpg not found for "));

    fs::write(dir.path().join("config.toml"), "cover_file_name = \"folder.jpg\"\n").unwrap();
    let code = run(dir.path(), &["cover", album.to_str().unwrap()]).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_fingerprint_of_missing_folder_is_general_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let code = run(dir.path(), &["fingerprint", missing.to_str().unwrap()]).unwrap();
    assert_eq!(code, ExitCode::GeneralError);
}
