//! Tunable effect parameters.
//!
//! [`FxConfig`] is inserted as a resource by `EffectsPlugin` and can be loaded
//! from JSON. Missing fields fall back to their defaults, so a config file only
//! needs to name what it overrides.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FxError;
use crate::fx_rng::DEFAULT_SEED;

/// Highest accepted update rate. Faster rates would tick more often than any
/// display refreshes.
pub const DEFAULT_MAX_RATE_HZ: f32 = 240.0;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Seed for the effect RNG. Same seed, same flicker/rumble offsets.
    pub rng_seed: u64,
    /// Requests with a faster update rate are rejected with `InvalidRate`.
    pub max_rate_hz: f32,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            rng_seed: DEFAULT_SEED,
            max_rate_hz: DEFAULT_MAX_RATE_HZ,
        }
    }
}

impl FxConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FxError> {
        let config: Self = serde_json::from_str(json)?;
        if !config.max_rate_hz.is_finite() || config.max_rate_hz <= 0.0 {
            return Err(FxError::Config(format!(
                "max_rate_hz must be positive, got {}",
                config.max_rate_hz
            )));
        }
        Ok(config)
    }
}
