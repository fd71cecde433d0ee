//! Command-line interface definitions for albumsync.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, config path, error format) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Is this album already on the player?
//! albumsync check ~/Music/Beatles/Help --target /media/player/Music
//!
//! # Copy it over (the target is remembered for next time)
//! albumsync sync ~/Music/Beatles/Help --target /media/player/Music
//!
//! # List albums with their sync status as JSON
//! albumsync scan ~/Music --output json
//!
//! # Remove it again
//! albumsync unsync Help
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fingerprint-based album folder synchronization.
///
/// albumsync decides whether an album folder already exists in a target
/// directory by comparing folder fingerprints (a hash of the folder name and
/// its file listing), and copies or removes album folders.
#[derive(Debug, Parser)]
#[command(name = "albumsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH", env = "ALBUMSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the fingerprint of a folder
    Fingerprint(FingerprintArgs),
    /// Check whether an album has a fingerprint match in the target directory
    Check(TargetedArgs),
    /// Copy an album folder into the target directory
    Sync(TargetedArgs),
    /// Remove an album folder from the target directory
    Unsync(UnsyncArgs),
    /// List album folders under a library directory
    Scan(ScanArgs),
    /// Print the cover image path for an album folder
    Cover(CoverArgs),
    /// Show or change remembered directories
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Arguments for the fingerprint subcommand.
#[derive(Debug, Args)]
pub struct FingerprintArgs {
    /// Folder to fingerprint
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Arguments for subcommands taking a source album and a target directory.
#[derive(Debug, Args)]
pub struct TargetedArgs {
    /// Source album folder
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Target directory (defaults to the last one used)
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,
}

/// Arguments for the unsync subcommand.
#[derive(Debug, Args)]
pub struct UnsyncArgs {
    /// Name of the album folder inside the target directory
    #[arg(value_name = "ALBUM_NAME")]
    pub album_name: String,

    /// Target directory (defaults to the last one used)
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Library directory to scan (defaults to the last one used)
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Resolve each album's sync status against this directory
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Do not consult the remembered target directory
    #[arg(long, conflicts_with = "target")]
    pub no_target: bool,

    /// Worker threads for building album records (0 = one per core)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
}

/// Arguments for the cover subcommand.
#[derive(Debug, Args)]
pub struct CoverArgs {
    /// Album folder
    #[arg(value_name = "ALBUM")]
    pub album: PathBuf,
}

/// Settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print remembered directories
    Show,
    /// Remember directories
    Set {
        /// Library directory
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,
        /// Target directory
        #[arg(long, value_name = "DIR")]
        target: Option<PathBuf>,
    },
    /// Forget remembered directories
    Clear,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
