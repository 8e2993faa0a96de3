//! Startup configuration for a simulation session.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use crate::error::{ConfigError, ConfigResult};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same simulation.
    pub seed: u64,
    /// World width in pixels.
    pub world_width: f64,
    /// World height in pixels.
    pub world_height: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl SimConfig {
    /// Check that the world is large enough to host a session.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }
}
