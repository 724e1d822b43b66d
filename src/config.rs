//! Engine configuration loaded from YAML.
//!
//! Every field is optional; a missing file yields [`EngineConfig::default`].
//!
//! ```yaml
//! projects:
//!   deleted_key_marker: _deleted_
//!   deleted_key_timestamp_format: "%Y%m%d%H%M%S%3f"
//! tasks:
//!   default_priority: medium
//! logging:
//!   filter: info
//! ```

use crate::project::domain::{
    DEFAULT_RETIRED_KEY_MARKER, DEFAULT_RETIRED_KEY_TIMESTAMP_FORMAT, KeyRetirementPolicy,
    ProjectDomainError,
};
use crate::task::domain::TaskPriority;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Filter used when neither the file nor `RUST_LOG` set one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid YAML for [`EngineConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The key retirement settings are unusable.
    #[error("invalid key retirement settings: {0}")]
    Retirement(#[from] ProjectDomainError),
}

/// Project lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// Text inserted between a retired key and its deletion timestamp.
    pub deleted_key_marker: String,
    /// `strftime` pattern for the deletion timestamp.
    pub deleted_key_timestamp_format: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            deleted_key_marker: DEFAULT_RETIRED_KEY_MARKER.to_owned(),
            deleted_key_timestamp_format: DEFAULT_RETIRED_KEY_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

/// Task workflow settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TasksConfig {
    /// Priority given to tasks created without one.
    pub default_priority: TaskPriority,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `taskboard=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Project lifecycle settings.
    pub projects: ProjectsConfig,
    /// Task workflow settings.
    pub tasks: TasksConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Parses configuration from YAML text. Blank text yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown fields
    /// and [`ConfigError::Retirement`] for unusable retirement settings.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.key_retirement_policy()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file or its directory does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file exists but cannot be read,
    /// or any error from [`Self::from_yaml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        match read_file(path) {
            Ok(text) => Self::from_yaml_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%path, "configuration file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Builds the key rewrite used when soft-deleting projects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Retirement`] when the marker is blank or the
    /// timestamp pattern is invalid.
    pub fn key_retirement_policy(&self) -> Result<KeyRetirementPolicy, ConfigError> {
        Ok(KeyRetirementPolicy::new(
            self.projects.deleted_key_marker.as_str(),
            self.projects.deleted_key_timestamp_format.as_str(),
        )?)
    }
}

fn read_file(path: &Utf8Path) -> io::Result<String> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}
