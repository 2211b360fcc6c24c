#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for retrial
//!
//! Later layers win: built-in defaults, one configuration file
//! (`./retrial.toml`, else the user's `retrial/config.toml`), `RETRIAL_*`
//! environment variables, then the flags the binary applies itself.

pub mod constants;

use retrial_errors::{ConfigError, Error};
use retrial_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Effective settings for one run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub verify: VerifyConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub default_output: OutputFormat,
    #[serde(default)]
    pub color: ColorChoice,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Overrides the file used to store dependency checksums
    pub checksum_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

/// Where live dependencies are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A TOML manifest listing each dependency and its file
    #[default]
    Manifest,
    /// A Maven-layout directory of resolved artifacts
    Repository,
}

/// Live dependency source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    pub manifest: Option<PathBuf>,
    pub repository: Option<PathBuf>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Verification configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerifyConfig {
    /// Concurrent hash computations (0 = auto-detect)
    #[serde(default)]
    pub max_concurrency: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Manifest,
            manifest: None,
            repository: None,
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    constants::DEFAULT_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}

impl Config {
    /// `<config dir>/retrial/config.toml`
    ///
    /// # Errors
    ///
    /// Fails on platforms without a user config directory.
    pub fn user_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::USER_CONFIG_DIR)
            .join(constants::USER_CONFIG_FILE))
    }

    /// Parse and validate one TOML file
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` for a missing file, an I/O error for any other
    /// read failure, `ParseError` for bad TOML, or a validation error.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into())
            }
            Err(e) => return Err(Error::io_with_path(&e, path)),
        };

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// First existing file of `./retrial.toml` and the user file, or defaults
    ///
    /// # Errors
    ///
    /// Fails only when a file exists and does not load.
    pub async fn load() -> Result<Self, Error> {
        let project_path = PathBuf::from(constants::CONFIG_FILE);
        if project_path.exists() {
            return Self::load_from_file(&project_path).await;
        }

        // No resolvable user config dir simply means no user config.
        if let Ok(user_path) = Self::user_path() {
            if user_path.exists() {
                return Self::load_from_file(&user_path).await;
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// An explicit `--config` path must exist; otherwise see [`Config::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Config::load_from_file`].
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Overlay the `RETRIAL_*` variables
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` naming the variable that did not parse.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        use constants::env;

        if let Ok(path) = std::env::var(env::CHECKSUM_FILE) {
            self.paths.checksum_file = Some(PathBuf::from(path));
        }

        // Setting a location also selects the matching source kind.
        if let Ok(path) = std::env::var(env::MANIFEST) {
            self.source.kind = SourceKind::Manifest;
            self.source.manifest = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(env::REPOSITORY) {
            self.source.kind = SourceKind::Repository;
            self.source.repository = Some(PathBuf::from(path));
        }

        if let Some(jobs) = parse_env::<usize>(env::MAX_CONCURRENCY)? {
            self.verify.max_concurrency = jobs;
        }

        if let Some(color) = parse_env::<ColorChoice>(env::COLOR)? {
            self.general.color = color;
        }

        if let Some(output) = parse_env::<OutputFormat>(env::OUTPUT)? {
            self.general.default_output = output;
        }

        Ok(())
    }

    /// Check invariants that serde defaults cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if the repository source has no artifact extensions.
    pub fn validate(&self) -> Result<(), Error> {
        if self.source.kind == SourceKind::Repository && self.source.extensions.is_empty() {
            return Err(ConfigError::Invalid {
                message: "source.extensions must list at least one artifact extension"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Get the checksum database path (with default)
    #[must_use]
    pub fn checksum_file(&self) -> PathBuf {
        self.paths
            .checksum_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::CHECKSUM_FILE))
    }

    /// Get the dependency manifest path (with default)
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.source
            .manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::MANIFEST_FILE))
    }

    /// Get the artifact repository path (with default)
    #[must_use]
    pub fn repository_path(&self) -> PathBuf {
        self.source
            .repository
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::REPOSITORY_DIR))
    }

    /// Get the log directory (with default)
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.paths
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::LOGS_DIR))
    }

    /// Effective number of concurrent hash computations
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        calculate_concurrency(self.verify.max_concurrency)
    }
}

/// `0` means one hashing task per logical CPU
#[must_use]
pub fn calculate_concurrency(config_value: usize) -> usize {
    if config_value > 0 {
        config_value
    } else {
        num_cpus::get().max(1)
    }
}

fn parse_env<T: std::str::FromStr>(var: &str) -> Result<Option<T>, Error> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: var.to_string(),
                value,
            }
            .into()),
        Err(_) => Ok(None),
    }
}
