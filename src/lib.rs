//! albumsync - fingerprint-based album folder synchronization
//!
//! A Rust library and CLI that decides whether a music album folder already
//! exists in a target directory (even under a different parent) by comparing
//! folder fingerprints, and copies or removes album folders between local
//! directories.
//!
//! The core is split into:
//! - [`fingerprint`]: folder fingerprints and their shared cache
//! - [`status`]: sync-status resolution by fingerprint matching
//! - [`replicate`]: recursive copy (sync) and removal (unsync)
//! - [`service`]: the cache-owning facade used by front ends

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod library;
pub mod logging;
pub mod output;
pub mod progress;
pub mod replicate;
pub mod service;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{Cli, Commands, OutputFormat, SettingsCommand};
use crate::config::{Config, Settings};
use crate::error::ExitCode;
use crate::output::{albums_to_json, format_albums, to_json, JsonFingerprint};
use crate::progress::Progress;
use crate::service::SyncService;

/// Print a serializable result as JSON, or its text form.
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(value)?),
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}

fn resolve_target(explicit: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    explicit
        .or_else(|| settings.last_target_directory.clone())
        .context("No target directory given and none remembered; pass --target")
}

/// Persist settings, logging rather than failing the command.
fn remember(settings: &Settings, path: Option<&Path>) {
    let Some(path) = path else {
        log::debug!("No settings location available, not saving");
        return;
    };
    if let Err(e) = settings.save(path) {
        log::warn!("Could not save settings: {}", e);
    }
}

/// Run the application with parsed command-line arguments.
///
/// Logging is left to the caller; see [`logging::init_logging`].
///
/// # Errors
///
/// Returns an error if the command fails; [`ExitCode::for_error`] picks the
/// process exit code for it.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref());
    if let Commands::Scan(ref args) = cli.command {
        if let Some(threads) = args.threads {
            config.threads = threads;
        }
    }

    let settings_path = match Settings::default_path(cli.config.as_deref()) {
        Ok(p) => Some(p),
        Err(e) => {
            log::debug!("Settings disabled: {}", e);
            None
        }
    };
    let mut settings = settings_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let format = cli.output;
    let progress = Progress::new(cli.quiet || format == OutputFormat::Json);
    let service = SyncService::new(config);

    match cli.command {
        Commands::Fingerprint(args) => {
            let fingerprint = service.compute_fingerprint(&args.path);
            let unavailable = fingerprint.is_empty();
            emit(
                format,
                &JsonFingerprint::new(&args.path, fingerprint.clone()),
                &fingerprint,
            )?;
            if unavailable {
                log::warn!("Fingerprint unavailable for {}", args.path.display());
                return Ok(ExitCode::GeneralError);
            }
            Ok(ExitCode::Success)
        }

        Commands::Check(args) => {
            let target = resolve_target(args.target, &settings)?;
            let status = service.check_sync(&args.source, &target);
            let text = if status.synced { "synced" } else { "not synced" };
            emit(format, &status, text)?;
            Ok(if status.synced {
                ExitCode::Success
            } else {
                ExitCode::NotSynced
            })
        }

        Commands::Sync(args) => {
            let target = resolve_target(args.target, &settings)?;
            let result = service
                .sync(&args.source, &target, Some(&progress))
                .with_context(|| format!("Failed to sync {}", args.source.display()))?;
            emit(format, &result, &result.result)?;

            settings.last_target_directory = Some(target);
            if let Some(parent) = args.source.parent() {
                settings.last_source_directory = Some(parent.to_path_buf());
            }
            remember(&settings, settings_path.as_deref());
            Ok(ExitCode::Success)
        }

        Commands::Unsync(args) => {
            let target = resolve_target(args.target, &settings)?;
            let result = service
                .unsync(&target, &args.album_name)
                .with_context(|| format!("Failed to unsync {}", args.album_name))?;
            emit(format, &result, &result.result)?;
            Ok(ExitCode::Success)
        }

        Commands::Scan(args) => {
            let directory = args
                .directory
                .or_else(|| settings.last_source_directory.clone())
                .context("No library directory given and none remembered")?;
            let target = if args.no_target {
                None
            } else {
                args.target
                    .clone()
                    .or_else(|| settings.last_target_directory.clone())
            };

            let albums = service.scan(&directory, target.as_deref(), Some(&progress));
            match format {
                OutputFormat::Json => println!("{}", albums_to_json(&albums)?),
                OutputFormat::Text => println!("{}", format_albums(&albums)),
            }

            settings.last_source_directory = Some(directory);
            if args.target.is_some() {
                settings.last_target_directory = target;
            }
            remember(&settings, settings_path.as_deref());
            Ok(ExitCode::Success)
        }

        Commands::Cover(args) => {
            let cover =
                library::require_cover_image(&args.album, &service.config().cover_file_name)?;
            let text = cover.display().to_string();
            emit(format, &cover, &text)?;
            Ok(ExitCode::Success)
        }

        Commands::Settings(command) => {
            match command {
                SettingsCommand::Show => {}
                SettingsCommand::Set { source, target } => {
                    if source.is_some() {
                        settings.last_source_directory = source;
                    }
                    if target.is_some() {
                        settings.last_target_directory = target;
                    }
                    let path = settings_path
                        .as_deref()
                        .context("No settings location available")?;
                    settings.save(path)?;
                }
                SettingsCommand::Clear => {
                    settings = Settings::default();
                    let path = settings_path
                        .as_deref()
                        .context("No settings location available")?;
                    settings.save(path)?;
                }
            }

            let show = |dir: &Option<PathBuf>| {
                dir.as_ref()
                    .map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
            };
            let text = format!(
                "source: {}\ntarget: {}",
                show(&settings.last_source_directory),
                show(&settings.last_target_directory)
            );
            emit(format, &settings, &text)?;
            Ok(ExitCode::Success)
        }
    }
}
