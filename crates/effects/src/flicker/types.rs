use bevy::prelude::*;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{FxError, RangeAxis};
use crate::targets::LightState;
use crate::timer::CallbackId;

/// Absolute perturbation ranges of a flicker. Each tick offsets the original
/// value by a uniform integer in `[-range, range]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlickerRange {
    pub x: i32,
    pub y: i32,
    pub alpha: i32,
}

impl FlickerRange {
    pub fn new(x: i32, y: i32, alpha: i32) -> Self {
        Self { x, y, alpha }
    }

    pub(crate) fn validate(&self) -> Result<(), FxError> {
        for (axis, value) in [
            (RangeAxis::X, self.x),
            (RangeAxis::Y, self.y),
            (RangeAxis::Alpha, self.alpha),
        ] {
            if value < 0 {
                return Err(FxError::NegativeRange { axis, value });
            }
        }
        Ok(())
    }
}

/// Bookkeeping for one active flicker.
#[derive(Debug, Clone)]
pub(crate) struct FlickerEntry {
    /// Snapshot taken at start; the only value ever restored.
    pub original: LightState,
    pub range: FlickerRange,
    pub tick: CallbackId,
    pub expiry: Option<CallbackId>,
}

/// One flicker step: the original state offset by a random amount in each
/// range, alpha clamped to `[0, 255]`.
pub fn perturb(original: LightState, range: FlickerRange, rng: &mut dyn RngCore) -> LightState {
    let dx = rng.gen_range(-range.x..=range.x);
    let dy = rng.gen_range(-range.y..=range.y);
    let da = rng.gen_range(-range.alpha..=range.alpha);

    let alpha = i32::from(original.alpha).saturating_add(da).clamp(0, 255);
    LightState {
        position: IVec2::new(
            original.position.x.saturating_add(dx),
            original.position.y.saturating_add(dy),
        ),
        alpha: alpha as u8,
    }
}
