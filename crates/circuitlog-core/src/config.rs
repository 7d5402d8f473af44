//! TOML-based application configuration.
//!
//! Stores the record API endpoint and metronome preferences.
//! Configuration lives at `~/.config/circuitlog/config.toml`; mutable
//! state (session snapshots, stopwatch) under the platform data dir.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Record API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Metronome preferences. The audio service itself is external; only
/// the persisted volume level lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetronomeConfig {
    /// Volume level 0-10.
    #[serde(default = "default_metronome_volume")]
    pub volume: u32,
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            volume: default_metronome_volume(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/circuitlog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metronome: MetronomeConfig,
}

fn default_base_url() -> String {
    "http://localhost:3000/".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_metronome_volume() -> u32 {
    3
}

/// Platform config directory for circuitlog.
/// `CIRCUITLOG_CONFIG_DIR` overrides it, mainly for tests.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("CIRCUITLOG_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("circuitlog"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Platform data directory for mutable state files.
/// `CIRCUITLOG_DATA_DIR` overrides it.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("CIRCUITLOG_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("circuitlog"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default path; missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "metronome.volume" => Some(self.metronome.volume.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-separated key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_err = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.timeout_secs" => {
                self.api.timeout_secs = value.parse().map_err(|e: std::num::ParseIntError| {
                    parse_err(e.to_string())
                })?;
            }
            "metronome.volume" => {
                let volume: u32 = value
                    .parse()
                    .map_err(|e: std::num::ParseIntError| parse_err(e.to_string()))?;
                if volume > crate::controls::MAX_METRONOME_LEVEL {
                    return Err(parse_err(format!(
                        "volume must be 0-{}",
                        crate::controls::MAX_METRONOME_LEVEL
                    )));
                }
                self.metronome.volume = volume;
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        self.save()
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.metronome.volume, 3);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://coach.example.com/".to_string();
        config.metronome.volume = 7;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://coach.example.com/");
        assert_eq!(loaded.metronome.volume, 7);
    }

    #[test]
    fn dotted_key_lookup() {
        let config = Config::default();
        assert_eq!(config.get("api.base_url").as_deref(), Some("http://localhost:3000/"));
        assert_eq!(config.get("metronome.volume").as_deref(), Some("3"));
        assert!(config.get("metronome.tempo").is_none());
    }

    #[test]
    fn set_rejects_bad_keys_and_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("metronome.tempo", "120"),
            Err(ConfigError::UnknownKey { .. })
        ));
        assert!(matches!(
            config.set("metronome.volume", "loud"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("metronome.volume", "11"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // Nothing mutated on failure.
        assert_eq!(config.metronome.volume, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://x/\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://x/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.metronome.volume, 3);
    }
}
