//! Application configuration.
//!
//! Loaded from an optional JSON file, then overridden from the command line.
//! Every field has a default, so a partial file is fine.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use skirmish_core::config::SimConfig;
use skirmish_core::constants::TICK_RATE;

/// Tuning for the autopilot input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    /// Ticks between shots while enemies are on screen.
    pub fire_interval_ticks: u64,
    /// Vertical distance to the target row treated as aligned (pixels).
    pub dead_zone: f64,
    /// Horizontal look-ahead for incoming enemy bullets (pixels).
    pub dodge_distance: f64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            fire_interval_ticks: 12,
            dead_zone: 6.0,
            dodge_distance: 140.0,
        }
    }
}

/// Full driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Nominal ticks per second of the paced loop.
    pub tick_rate_hz: u32,
    /// Multiplier on the paced loop's speed (2.0 = twice as fast).
    pub time_scale: f64,
    /// Stop after this many ticks if the game is still running.
    pub max_ticks: u64,
    pub autopilot: AutopilotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate_hz: TICK_RATE,
            time_scale: 1.0,
            max_ticks: 36_000,
            autopilot: AutopilotConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub max_ticks: Option<u64>,
    pub world_width: Option<f64>,
    pub world_height: Option<f64>,
}

impl AppConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid configuration JSON")
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading {}", path.display()))
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(seed) = overrides.seed {
            self.sim.seed = seed;
        }
        if let Some(ticks) = overrides.max_ticks {
            self.max_ticks = ticks;
        }
        if let Some(width) = overrides.world_width {
            self.sim.world_width = width;
        }
        if let Some(height) = overrides.world_height {
            self.sim.world_height = height;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sim.validate().context("invalid sim config")?;
        if self.tick_rate_hz == 0 {
            bail!("tick_rate_hz must be at least 1");
        }
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            bail!("time_scale must be positive, got {}", self.time_scale);
        }
        if self.autopilot.fire_interval_ticks == 0 {
            bail!("autopilot.fire_interval_ticks must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::error::ConfigError;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_rate_hz, 60);
        assert_eq!(config.sim.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AppConfig::from_json(r#"{"sim": {"seed": 7}, "autopilot": {"dead_zone": 2.5}}"#)
                .unwrap();
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.sim.world_width, 800.0);
        assert_eq!(config.autopilot.dead_zone, 2.5);
        assert_eq!(config.autopilot.fire_interval_ticks, 12);
        assert_eq!(config.max_ticks, 36_000);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AppConfig::default();
        config.apply(&Overrides {
            seed: Some(9),
            max_ticks: Some(100),
            world_width: Some(1024.0),
            world_height: None,
        });
        assert_eq!(config.sim.seed, 9);
        assert_eq!(config.max_ticks, 100);
        assert_eq!(config.sim.world_width, 1024.0);
        assert_eq!(config.sim.world_height, 600.0);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.time_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sim.world_height = -1.0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidDimension {
                field: "world_height",
                value: -1.0
            })
        );
        assert!(format!("{err:#}").contains("world_height"));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = AppConfig::load(Path::new("/nonexistent/skirmish.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/skirmish.json"));
    }
}
