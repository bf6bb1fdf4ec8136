//! Deterministic effect RNG resource.
//!
//! Wraps `ChaCha8Rng` so identical seeds produce identical flicker and rumble
//! offsets. Effect code never calls `rand::thread_rng()`; it takes the random
//! source from its `FxContext`, which the plugin fills from this resource.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic RNG resource for all effect randomness.
#[derive(Resource)]
pub struct FxRng(pub ChaCha8Rng);

impl Default for FxRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl FxRng {
    /// Create a new `FxRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
