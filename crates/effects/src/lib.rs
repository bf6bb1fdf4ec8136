//! Transient stage effects: light flicker and viewport rumble.
//!
//! Effects are short-lived periodic perturbations of live targets. Each one
//! snapshots what it touches, ticks from the timer table, and writes the
//! snapshot back when it ends, whether it is stopped by hand, expires, or
//! loses its target mid-flight.
//!
//! The managers ([`FlickerManager`], [`RumbleManager`]) are plain resources
//! driven through an [`FxContext`]; [`EffectsPlugin`] installs them together
//! with in-memory collaborators and the per-frame systems.

use bevy::prelude::*;

pub mod config;
pub mod context;
pub mod error;
pub mod flicker;
pub mod fx_rng;
pub mod handle;
pub mod requests;
pub mod rumble;
pub mod systems;
pub mod targets;
pub mod timer;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_harness;

pub use config::FxConfig;
pub use context::FxContext;
pub use error::FxError;
pub use flicker::{FlickerManager, FlickerRange};
pub use fx_rng::FxRng;
pub use handle::{EffectHandle, HandleId};
pub use requests::{
    EndFlickerEvent, FlickerStartedEvent, ResetFlickersEvent, StartFlickerEvent,
    StartRumbleEvent, StopRumbleEvent,
};
pub use rumble::{RumbleManager, RumbleState};
pub use systems::dispatch_callback;
pub use targets::{AreaView, LightId, LightRegistry, LightState, LightTable, RenderSurface, Viewport};
pub use timer::{CallbackId, FxCallback, TickTable, TimerService};

/// Per-frame ordering of the effect systems in `Update`.
///
/// ```text
/// Requests  →  Timers
/// ```
///
/// Requests sent this frame are applied before the timers advance, so a
/// flicker started this frame can already tick this frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectsSet {
    Requests,
    Timers,
}

/// Installs the effect managers, their collaborators and systems.
///
/// Resources the host inserted beforehand (`LightTable`, `AreaView`,
/// `TickTable`) are kept.
#[derive(Default)]
pub struct EffectsPlugin {
    pub config: FxConfig,
}

impl EffectsPlugin {
    pub fn with_config(config: FxConfig) -> Self {
        Self { config }
    }
}

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        info!(
            "Effects: seed {}, max rate {} Hz",
            config.rng_seed, config.max_rate_hz
        );

        app.insert_resource(FxRng::from_seed_u64(config.rng_seed))
            .insert_resource(FlickerManager::with_max_rate(config.max_rate_hz))
            .insert_resource(RumbleManager::with_max_rate(config.max_rate_hz))
            .insert_resource(config)
            .init_resource::<TickTable>()
            .init_resource::<LightTable>()
            .init_resource::<AreaView>()
            .add_event::<StartFlickerEvent>()
            .add_event::<EndFlickerEvent>()
            .add_event::<ResetFlickersEvent>()
            .add_event::<StartRumbleEvent>()
            .add_event::<StopRumbleEvent>()
            .add_event::<FlickerStartedEvent>()
            .configure_sets(Update, (EffectsSet::Requests, EffectsSet::Timers).chain())
            .add_systems(
                Update,
                (
                    systems::apply_effect_requests.in_set(EffectsSet::Requests),
                    systems::drive_effect_timers.in_set(EffectsSet::Timers),
                ),
            );
    }
}
