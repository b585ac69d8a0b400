//! Directory configuration file.
//!
//! # Responsibility
//! - Load the database location and logging settings from TOML.
//! - Fill missing keys with defaults.
//!
//! # Invariants
//! - Unknown keys are rejected so typos do not silently fall back.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_DATABASE_FILE: &str = "restodir.db";

/// Settings shared by every entry point opening the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// SQLite database file, created on first open.
    pub database_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            log_level: LogLevel::default(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl DirectoryConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses and validates TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path cannot be empty".to_string(),
            ));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DirectoryConfig};
    use crate::logging::{default_log_level, LogLevel};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_file_uses_defaults() {
        let config = DirectoryConfig::parse("").unwrap();
        assert_eq!(config.database_path, PathBuf::from("restodir.db"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn parses_every_key() {
        let config = DirectoryConfig::parse(
            r#"
database_path = "/var/lib/restodir/directory.db"
log_level = "WARN"
log_dir = "/var/log/restodir"
"#,
        )
        .unwrap();
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/restodir/directory.db")
        );
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/restodir")));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_levels() {
        assert!(matches!(
            DirectoryConfig::parse("databse_path = \"x.db\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DirectoryConfig::parse("log_level = \"loud\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_relative_log_dir() {
        let err = DirectoryConfig::parse("log_dir = \"logs\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("absolute")));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"directory.db\"").unwrap();

        let config = DirectoryConfig::load(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("directory.db"));

        let missing = DirectoryConfig::load("/nonexistent/restodir.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
