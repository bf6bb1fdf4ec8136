//! The collaborators every manager operation is handed.

use rand::RngCore;

use crate::targets::{LightRegistry, Viewport};
use crate::timer::TimerService;

/// Explicit dependencies of one effect operation: where callbacks are
/// registered, where lights and the viewport live, and the random source.
///
/// The managers hold no reference to any of these between calls; the host
/// borrows them for the duration of a single `start`/`tick`/`stop`.
pub struct FxContext<'a> {
    pub timers: &'a mut dyn TimerService,
    pub lights: &'a mut dyn LightRegistry,
    /// Viewport offset and the render surface dirty flag.
    pub area: &'a mut dyn Viewport,
    pub rng: &'a mut dyn RngCore,
}
