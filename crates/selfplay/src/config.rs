//! Configuration file loading for self-play.
//!
//! Settings come from a TOML file (`selfplay.toml` by default). A missing
//! file is not an error; every field has a default.

use chess_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for a self-play run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelfplayConfig {
    /// Seed for the random choices of both players. Defaults to 0.
    #[serde(default)]
    pub seed: u64,
    /// Plies after which the game is abandoned. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: usize,
    /// Starting position in FEN. Defaults to the standard position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_fen: Option<String>,
    /// Search settings for white.
    #[serde(default)]
    pub white: SearchConfig,
    /// Search settings for black.
    #[serde(default)]
    pub black: SearchConfig,
}

fn default_max_plies() -> usize {
    200
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        SelfplayConfig {
            seed: 0,
            max_plies: default_max_plies(),
            start_fen: None,
            white: SearchConfig::default(),
            black: SearchConfig::default(),
        }
    }
}

impl SelfplayConfig {
    /// Loads the configuration from `path`, or returns the defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("selfplay.toml")
    }
}
