//=========================================================================
// Simulator Configuration
//=========================================================================
//
// Process-lifetime settings: image geometry, frame rate, wheel distance
// simulation and the readiness delay.
//
// Sources:
//   SimConfig::default()            (built-in values)
//   SimConfig::from_json_str(..)    (host supplied JSON)
//   SimConfig::load(path)           (JSON file on disk)
//
// Every field is optional in JSON; missing fields keep their default.
// Loaded configurations are validated before use.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::path::Path;
use std::time::Duration;

//=== External Crates =====================================================

use serde::Deserialize;
use thiserror::Error;

/// Highest frame rate whose tick period is still at least one millisecond.
pub const MAX_SIM_FPS: u32 = 1000;

//=== ConfigError =========================================================

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

//=== SimConfig ===========================================================

/// Configuration fixed for the lifetime of a simulator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width of the simulated camera image in pixels.
    pub image_width: f64,

    /// Height of the simulated camera image in pixels.
    pub image_height: f64,

    /// Simulated frames per second.
    pub sim_fps: u32,

    /// Attach a wheel-driven `distance` to gestures and objects.
    pub wheel_distance_enabled: bool,

    /// Distance change per wheel notch in millimetres.
    pub wheel_distance_increment: f64,

    /// Delay between the host's "modules started" signal and the first
    /// emitted frame.
    pub ready_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            image_width: 1920.0,
            image_height: 1080.0,
            sim_fps: 30,
            wheel_distance_enabled: true,
            wheel_distance_increment: 10.0,
            ready_delay_ms: 1000,
        }
    }
}

impl SimConfig {
    //--- Loading ----------------------------------------------------------

    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    //--- Validation -------------------------------------------------------

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.image_width.is_finite() && self.image_width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "image_width",
                reason: format!("must be a positive number, got {}", self.image_width),
            });
        }
        if !(self.image_height.is_finite() && self.image_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "image_height",
                reason: format!("must be a positive number, got {}", self.image_height),
            });
        }
        if self.sim_fps == 0 {
            return Err(ConfigError::Invalid {
                field: "sim_fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.sim_fps > MAX_SIM_FPS {
            return Err(ConfigError::Invalid {
                field: "sim_fps",
                reason: format!("must be at most {}, got {}", MAX_SIM_FPS, self.sim_fps),
            });
        }
        if !(self.wheel_distance_increment.is_finite() && self.wheel_distance_increment >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "wheel_distance_increment",
                reason: format!(
                    "must be a non-negative number, got {}",
                    self.wheel_distance_increment
                ),
            });
        }
        Ok(())
    }

    //--- Derived Values ---------------------------------------------------

    /// Tick period, truncated to whole milliseconds like an interval timer.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.sim_fps.clamp(1, MAX_SIM_FPS)))
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
