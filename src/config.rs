//! Adapter configuration.

use arfeat_data::Orientation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Display orientation must be known")]
    UnknownDisplayOrientation,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration shared by feature adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Current display orientation, substituted for `Orientation::Unknown`.
    pub display_orientation: Orientation,
    /// Whether frames come from the world-facing camera.
    pub world_facing: bool,
    pub logging: LoggingConfig,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            display_orientation: Orientation::Portrait,
            world_facing: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl FeatureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display orientation.
    pub fn with_display_orientation(mut self, orientation: Orientation) -> Self {
        self.display_orientation = orientation;
        self
    }

    /// Set whether frames come from the world-facing camera.
    pub fn with_world_facing(mut self, world_facing: bool) -> Self {
        self.world_facing = world_facing;
        self
    }

    /// Set the default log filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FeatureConfig = serde_json::from_str(json)?;
        if config.display_orientation == Orientation::Unknown {
            return Err(ConfigError::UnknownDisplayOrientation);
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
