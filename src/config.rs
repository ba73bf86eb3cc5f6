//! Application configuration
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables (`LATINSAY_DATA_DIR`, `LATINSAY_FEED`)
//! 3. Config file (explicit path, or `<config_dir>/latinsay/config.toml`)
//! 4. Compiled defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::DEFAULT_DELIMITER;
use crate::storage::FileStorage;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where learning data is kept (default: platform data dir)
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Saying file, relative paths resolve against the working directory
    pub path: PathBuf,
    /// Single-byte field delimiter
    pub delimiter: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("db.csv"),
            delimiter: (DEFAULT_DELIMITER as char).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the user config file if it
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_path() {
                Some(user_path) if user_path.exists() => Self::from_file(&user_path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Reading config from {:?}", path);
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("latinsay").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("LATINSAY_DATA_DIR") {
            if !dir.is_empty() {
                self.storage.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(feed) = std::env::var("LATINSAY_FEED") {
            if !feed.is_empty() {
                self.feed.path = PathBuf::from(feed);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter()?;
        Ok(())
    }

    /// The feed delimiter as a byte
    pub fn delimiter(&self) -> Result<u8> {
        let bytes = self.feed.delimiter.as_bytes();
        match bytes {
            [b] if *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
            _ => Err(ConfigError::Validation {
                field: "feed.delimiter".to_string(),
                message: format!(
                    "must be a single ASCII character other than a quote or newline, got {:?}",
                    self.feed.delimiter
                ),
            }),
        }
    }

    /// Configured data directory, falling back to the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.data_dir, None);
        assert_eq!(config.feed.path, PathBuf::from("db.csv"));
        assert_eq!(config.delimiter().unwrap(), b',');
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            [storage]
            data_dir = "/tmp/latinsay"

            [feed]
            path = "sayings.csv"
            delimiter = ";"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/latinsay")));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/latinsay"));
        assert_eq!(config.feed.path, PathBuf::from("sayings.csv"));
        assert_eq!(config.delimiter().unwrap(), b';');
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[feed]\npath = \"other.csv\"\n").unwrap();
        assert_eq!(config.feed.path, PathBuf::from("other.csv"));
        assert_eq!(config.feed.delimiter, ",");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("[feed\npath = ");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_delimiter() {
        for delimiter in ["", ";;", "\"", "ș"] {
            let mut config = Config::default();
            config.feed.delimiter = delimiter.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation { .. })),
                "delimiter {:?}",
                delimiter
            );
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[feed]").unwrap();
        writeln!(file, "delimiter = \"\\t\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.delimiter().unwrap(), b'\t');
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
