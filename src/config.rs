//! Overlay configuration.
//!
//! Stored as JSON; every key is optional and falls back to its default, so an
//! empty object is a valid config file.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::DEFAULT_TITLE;
use crate::SCOREBOARD_TOPIC;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardConfig {
    /// Data-channel topic to subscribe to.
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_title")]
    pub title: String,
    /// Inner width of the terminal panel, in characters.
    #[serde(default = "default_text_width")]
    pub text_width: usize,
    /// Line clamp applied to scenario and critique text.
    #[serde(default = "default_clamp_lines")]
    pub clamp_lines: usize,
}

fn default_topic() -> String {
    SCOREBOARD_TOPIC.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_text_width() -> usize {
    44
}

fn default_clamp_lines() -> usize {
    2
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            title: default_title(),
            text_width: default_text_width(),
            clamp_lines: default_clamp_lines(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScoreboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }
}
