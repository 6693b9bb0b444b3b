//! Engine configuration and its JSON loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sentry_core::constants::*;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Outer range limit; interceptors launch from here.
    pub radar_radius: f64,
    /// Sweep advance per tick (degrees).
    pub sweep_increment_deg: f64,
    pub generic_count: usize,
    pub missile_count: usize,
    pub interceptor_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            radar_radius: DEFAULT_RADAR_RADIUS,
            sweep_increment_deg: SWEEP_INCREMENT_DEG,
            generic_count: DEFAULT_GENERIC_COUNT,
            missile_count: DEFAULT_MISSILE_COUNT,
            interceptor_count: DEFAULT_INTERCEPTOR_COUNT,
        }
    }
}

impl SimConfig {
    /// A configuration with no initial population, for scripted scenarios.
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            generic_count: 0,
            missile_count: 0,
            interceptor_count: 0,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radar_radius.is_finite() || self.radar_radius <= SPAWN_MIN_RANGE {
            return Err(ConfigError::Invalid(format!(
                "radar_radius must exceed {SPAWN_MIN_RANGE}, got {}",
                self.radar_radius
            )));
        }
        if !(self.sweep_increment_deg > 0.0 && self.sweep_increment_deg < 360.0) {
            return Err(ConfigError::Invalid(format!(
                "sweep_increment_deg must be in (0, 360), got {}",
                self.sweep_increment_deg
            )));
        }
        Ok(())
    }
}
