//! TOML configuration for the student store and its host process.
//!
//! # Responsibility
//! - Load settings from a TOML file with per-field defaults.
//! - Validate settings before any store is opened.
//!
//! # Invariants
//! - `cipher_key` is never printed by `Debug`.
//! - Unknown keys are rejected so typos do not silently fall back to defaults.

use crate::db::StoreLocation;
use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

/// `db_path` value selecting a private in-memory store.
pub const MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Process-level settings.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdmsConfig {
    /// Database file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Grade cipher key. Must match across sessions for rows to decode.
    #[serde(default = "default_cipher_key")]
    pub cipher_key: String,

    #[serde(default = "default_level")]
    pub log_level: String,

    /// Absolute directory for rolling log files. Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Insert the demo record when the store starts empty.
    #[serde(default = "default_seed_demo_record")]
    pub seed_demo_record: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("students.db")
}

fn default_cipher_key() -> String {
    "mySecretKey".to_string()
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_seed_demo_record() -> bool {
    true
}

impl Default for SdmsConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            cipher_key: default_cipher_key(),
            log_level: default_level(),
            log_dir: None,
            seed_demo_record: default_seed_demo_record(),
        }
    }
}

impl Debug for SdmsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdmsConfig")
            .field("db_path", &self.db_path)
            .field("cipher_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("seed_demo_record", &self.seed_demo_record)
            .finish()
    }
}

impl SdmsConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks settings that would otherwise fail later at store or logger setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".to_string()));
        }
        if self.cipher_key.is_empty() {
            return Err(ConfigError::Invalid(
                "cipher_key must not be empty".to_string(),
            ));
        }
        normalize_level(&self.log_level).map_err(ConfigError::Invalid)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Resolves `db_path` into a store location.
    pub fn store_location(&self) -> StoreLocation {
        if self.db_path == Path::new(MEMORY_DB_PATH) {
            StoreLocation::memory()
        } else {
            StoreLocation::file(&self.db_path)
        }
    }
}
