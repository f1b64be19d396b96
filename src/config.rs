//! Notifier configuration.
//!
//! Loaded from `{working_dir}/.m3u8-notifier/config.json` when present.
//! Environment variables are used as defaults when no config file exists:
//! - `M3U8_DEBUG` - enable the gated debug log sink (`1`/`true`)
//! - `M3U8_NOTIFICATION_CHANNEL` - channel id
//! - `M3U8_NOTIFICATION_SLOT` - slot id

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CHANNEL_ID: &str = "M3U8_DOWNLOADER_NOTIFICATION";
pub const DEFAULT_SLOT_ID: i32 = 9527;
pub const DEFAULT_TITLE: &str = "Download M3U8 file";
pub const SELECT_NOTIFICATION_ACTION: &str = "SELECT_NOTIFICATION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub channel_id: String,
    pub slot_id: i32,
    /// Title used when the task label is empty.
    pub default_title: String,
    /// Action carried by the tap target of a completed download.
    pub select_action: String,
    pub min_progress_delta: i32,
    pub debug_mode: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            slot_id: DEFAULT_SLOT_ID,
            default_title: DEFAULT_TITLE.to_string(),
            select_action: SELECT_NOTIFICATION_ACTION.to_string(),
            min_progress_delta: crate::notification::DEFAULT_MIN_DELTA,
            debug_mode: false,
        }
    }
}

impl NotifierConfig {
    /// Load configuration for `working_dir`, falling back to the environment.
    pub fn load(working_dir: &Path) -> Self {
        let path = Self::config_path(working_dir);

        if !path.exists() {
            tracing::debug!(
                "No notifier config at {}, using environment defaults",
                path.display()
            );
            return Self::from_env();
        }

        match Self::load_from_path(&path) {
            Ok(config) => {
                tracing::info!("Loaded notifier config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load notifier config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                Self::from_env()
            }
        }
    }

    pub fn config_path(working_dir: &Path) -> PathBuf {
        working_dir.join(".m3u8-notifier/config.json")
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("M3U8_DEBUG") {
            config.debug_mode = matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Ok(v) = std::env::var("M3U8_NOTIFICATION_CHANNEL") {
            if !v.trim().is_empty() {
                config.channel_id = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("M3U8_NOTIFICATION_SLOT") {
            match v.trim().parse::<i32>() {
                Ok(slot) => config.slot_id = slot,
                Err(e) => tracing::warn!("Ignoring invalid M3U8_NOTIFICATION_SLOT={}: {}", v, e),
            }
        }

        config
    }

    /// Write this configuration under `working_dir`.
    pub fn save(&self, working_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::config_path(working_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        tracing::debug!("Saved notifier config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = NotifierConfig::default();
        assert_eq!(config.channel_id, "M3U8_DOWNLOADER_NOTIFICATION");
        assert_eq!(config.slot_id, 9527);
        assert_eq!(config.min_progress_delta, 2);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let config = NotifierConfig {
            slot_id: 42,
            debug_mode: true,
            ..NotifierConfig::default()
        };
        config.save(temp.path()).unwrap();

        let loaded = NotifierConfig::load(temp.path());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = NotifierConfig::config_path(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "default_title": "Videos" }"#).unwrap();

        let loaded = NotifierConfig::load(temp.path());
        assert_eq!(loaded.default_title, "Videos");
        assert_eq!(loaded.slot_id, DEFAULT_SLOT_ID);
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = NotifierConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
