//! Configuration file support for folio.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file is not an error: every section falls back to its defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::AuroraConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// Default log filter when neither the config nor `FOLIO_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "folio=info,warn";

/// Errors from reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no home directory to place the config in")]
    NoConfigDir,
}

/// Contact form delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Form endpoint that accepts a url-encoded POST. `None` disables sending.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Where the portfolio content comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// TOML file with a portfolio; the built-in one is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for rolling log files. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Everything read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub background: AuroraConfig,
    pub contact: ContactConfig,
    pub content: ContentConfig,
    pub log: LogConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "folio", "folio")
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Default directory for log files, if the platform has one.
    pub fn default_log_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }

    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Log directory to use: the configured one or the platform default.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log.directory.clone().or_else(Self::default_log_dir)
    }
}
