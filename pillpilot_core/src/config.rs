//! Configuration file support for PillPilot.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pillpilot/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Medicine table sizing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Schedule heap sizing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Log output configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Largest store or queue capacity accepted from configuration
pub const MAX_CAPACITY: usize = 100_000;

// Default value functions
fn default_capacity() -> usize {
    100
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("pillpilot").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject settings the fixed-capacity structures cannot work with
    pub fn validate(&self) -> Result<()> {
        for (key, capacity) in [
            ("store.capacity", self.store.capacity),
            ("queue.capacity", self.queue.capacity),
        ] {
            if capacity == 0 {
                return Err(Error::Config(format!("{} must be at least 1", key)));
            }
            if capacity > MAX_CAPACITY {
                return Err(Error::Config(format!(
                    "{} must be at most {}, got {}",
                    key, MAX_CAPACITY, capacity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.capacity, 100);
        assert_eq!(config.queue.capacity, 100);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.store.capacity = 7;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.store.capacity, 7);
        assert_eq!(parsed.queue.capacity, config.queue.capacity);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[queue]
capacity = 12
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.queue.capacity, 12);
        assert_eq!(config.store.capacity, 100); // default
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ncapacity = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let mut config = Config::default();
        config.queue.capacity = MAX_CAPACITY;
        assert!(config.validate().is_ok());

        config.store.capacity = MAX_CAPACITY + 1;
        match config.validate() {
            Err(Error::Config(msg)) => assert!(msg.contains("store.capacity must be at most")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store\ncapacity = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
