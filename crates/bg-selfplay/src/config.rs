//! Configuration file loading for the self-play driver.
//!
//! Settings come from `selfplay.toml` in the working directory. Every key is
//! optional; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Self-play settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SelfplayConfig {
    /// Number of games to play. Defaults to 100.
    #[serde(default = "default_games")]
    pub games: u32,
    /// Seed for dice and action choice. Game `n` uses `seed + n`.
    #[serde(default)]
    pub seed: u64,
    /// Actions after which an unfinished game is abandoned. Defaults to 2000.
    #[serde(default = "default_max_actions")]
    pub max_actions: u32,
    /// Resolve legal actions without memoization.
    #[serde(default)]
    pub exhaustive_search: bool,
}

fn default_games() -> u32 {
    100
}

fn default_max_actions() -> u32 {
    2000
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        SelfplayConfig {
            games: default_games(),
            seed: 0,
            max_actions: default_max_actions(),
            exhaustive_search: false,
        }
    }
}

impl SelfplayConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("selfplay.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
games = 12
seed = 42
max_actions = 500
exhaustive_search = true
"#;
        let config: SelfplayConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config,
            SelfplayConfig {
                games: 12,
                seed: 42,
                max_actions: 500,
                exhaustive_search: true,
            }
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SelfplayConfig = toml::from_str("seed = 7").unwrap();
        assert_eq!(config.games, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_actions, 2000);
        assert!(!config.exhaustive_search);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result: Result<SelfplayConfig, _> = toml::from_str("games = \"many\"");
        let err = ConfigError::from(result.unwrap_err());
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SelfplayConfig::load_from(&dir.path().join("selfplay.toml")).unwrap();
        assert_eq!(config, SelfplayConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selfplay.toml");
        std::fs::write(&path, "games = 3\nmax_actions = 10\n").unwrap();
        let config = SelfplayConfig::load_from(&path).unwrap();
        assert_eq!(config.games, 3);
        assert_eq!(config.max_actions, 10);
        assert_eq!(config.seed, 0);
    }
}
