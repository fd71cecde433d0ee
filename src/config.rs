//! Application configuration and persisted settings.
//!
//! Two files live in the platform-specific config directory:
//!
//! * `config.toml` - scan tunables ([`Config`]), layered with figment as
//!   defaults < config file < `ALBUMSYNC_*` environment variables
//! * `settings.json` - the last source and target directories used
//!   ([`Settings`]), rewritten after successful commands
//!
//! Neither file is required. Unreadable or malformed files fall back to
//! defaults so a broken config never blocks a sync.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ALBUMSYNC_";

/// Errors raised while loading or saving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home/config directory could be determined for this platform.
    #[error("failed to determine project directories")]
    NoProjectDirs,

    /// The layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// Settings could not be (de)serialized.
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "albumsync", "albumsync").ok_or(ConfigError::NoProjectDirs)
}

/// Scan tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File suffixes that mark a file as audio (case-insensitive).
    pub audio_extensions: Vec<String>,
    /// File name looked up in an album folder, then its parent, for cover art.
    pub cover_file_name: String,
    /// Parent folder names that are library roots rather than artists.
    pub root_folder_names: Vec<String>,
    /// Worker threads for scanning, 0 for one per core.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_extensions: [".mp3", ".flac", ".m4a", ".aac", ".ogg", ".wav", ".wma"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            cover_file_name: "cover.jpg".to_string(),
            root_folder_names: ["Music", "Songs", "Audio", "Media"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            threads: 0,
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults on any error.
    ///
    /// `path` overrides the default `config.toml` location.
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration, reporting errors.
    ///
    /// A missing config file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file or environment holds values that
    /// do not fit the schema, or no default location can be determined.
    pub fn try_load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        Self::figment(&path).extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    /// The layered provider stack for a given config file.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific `config.toml` path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoProjectDirs`] if no home directory is known.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

/// Directories remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Library directory most recently scanned or synced from.
    pub last_source_directory: Option<PathBuf>,
    /// Target directory most recently synced into.
    pub last_target_directory: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing file yields empty settings; an unparsable one is logged and
    /// also yields empty settings.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not parse settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default settings file, stored beside `config`'s directory if given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoProjectDirs`] if no home directory is known.
    pub fn default_path(config: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match config.and_then(Path::parent) {
            Some(dir) => Ok(dir.join("settings.json")),
            None => Ok(project_dirs()?.config_dir().join("settings.json")),
        }
    }
}
