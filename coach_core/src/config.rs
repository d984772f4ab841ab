//! Configuration file support for Coach.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/coach/config.toml`.
//! Workout data itself is never written to disk.

use crate::nav::Role;
use crate::{Error, PerceivedEffort, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub stopwatch: StopwatchConfig,

    #[serde(default)]
    pub effort: EffortConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Startup configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub role: Role,

    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: Role::default(),
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

/// Exercise stopwatch configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopwatchConfig {
    /// How often a running stopwatch is refreshed; elapsed time always
    /// follows the wall clock
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

/// Perceived effort configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EffortConfig {
    /// Effort recorded when notes are saved without an explicit rating
    #[serde(default = "default_effort")]
    pub default: u8,
}

impl Default for EffortConfig {
    fn default() -> Self {
        Self {
            default: default_effort(),
        }
    }
}

/// Output formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weight_unit: default_weight_unit(),
        }
    }
}

// Default value functions
fn default_seed_sample_data() -> bool {
    true
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_effort() -> u8 {
    5
}

fn default_weight_unit() -> String {
    "kg".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            Some(config_path) => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
            None => {
                tracing::info!("No config directory available, using defaults");
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
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join("coach").join("config.toml"))
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

    /// Check values serde cannot express as types
    pub fn validate(&self) -> Result<()> {
        if self.stopwatch.tick_millis == 0 {
            return Err(Error::Config("stopwatch.tick_millis must be positive".into()));
        }
        self.default_effort()?;
        if self.display.weight_unit.trim().is_empty() {
            return Err(Error::Config("display.weight_unit must not be empty".into()));
        }
        Ok(())
    }

    pub fn default_effort(&self) -> Result<PerceivedEffort> {
        PerceivedEffort::new(self.effort.default)
            .map_err(|e| Error::Config(format!("effort.default: {}", e)))
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.stopwatch.tick_millis)
    }
}
