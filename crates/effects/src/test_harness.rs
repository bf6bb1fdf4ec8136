//! # Test harnesses for the effects crate
//!
//! - [`EffectRig`]: the managers plus in-memory collaborators, no Bevy `App`.
//!   Steps the tick table by hand, for unit tests of the managers.
//! - [`TestStage`]: a headless Bevy `App` with `EffectsPlugin` and a manual
//!   clock, for integration tests of the plugin systems.

use std::time::Duration;

use bevy::app::App;
use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    dispatch_callback, AreaView, EffectHandle, EffectsPlugin, FlickerManager, FlickerRange,
    FlickerStartedEvent, FxConfig, FxContext, FxError, FxRng, LightId, LightState, LightTable,
    RumbleManager, TickTable,
};

/// Fixed frame length used by both harnesses.
pub const STEP: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// EffectRig
// ---------------------------------------------------------------------------

pub struct EffectRig {
    pub timers: TickTable,
    pub lights: LightTable,
    pub area: AreaView,
    pub rng: ChaCha8Rng,
    pub flickers: FlickerManager,
    pub rumble: RumbleManager,
}

impl EffectRig {
    pub fn new() -> Self {
        Self::with_seed(7)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            timers: TickTable::default(),
            lights: LightTable::default(),
            area: AreaView::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            flickers: FlickerManager::default(),
            rumble: RumbleManager::default(),
        }
    }

    pub fn with_light(mut self, id: u32, x: i32, y: i32, alpha: u8) -> Self {
        self.lights.insert(LightId(id), LightState::new(x, y, alpha));
        self
    }

    /// Borrow the managers and a context over the rig's collaborators.
    pub fn run<R>(
        &mut self,
        f: impl FnOnce(&mut FlickerManager, &mut RumbleManager, &mut FxContext<'_>) -> R,
    ) -> R {
        let mut ctx = FxContext {
            timers: &mut self.timers,
            lights: &mut self.lights,
            area: &mut self.area,
            rng: &mut self.rng,
        };
        f(&mut self.flickers, &mut self.rumble, &mut ctx)
    }

    pub fn start_flicker(
        &mut self,
        id: u32,
        range: FlickerRange,
        rate_hz: f32,
        duration_secs: Option<f32>,
    ) -> Result<EffectHandle, FxError> {
        self.run(|flickers, _, ctx| {
            flickers.start_flicker(ctx, LightId(id), range, rate_hz, duration_secs)
        })
    }

    pub fn end_flicker(&mut self, handle: EffectHandle) -> bool {
        self.run(|flickers, _, ctx| flickers.end_flicker(ctx, handle))
    }

    pub fn start_rumble(
        &mut self,
        rate_hz: f32,
        intensity: i32,
        duration_secs: Option<f32>,
    ) -> Result<(), FxError> {
        self.run(|_, rumble, ctx| rumble.start_rumble(ctx, rate_hz, intensity, duration_secs))
    }

    pub fn stop_rumble(&mut self) -> bool {
        self.run(|_, rumble, ctx| rumble.stop_rumble(ctx))
    }

    /// Advance one frame and dispatch every due callback. Returns how many
    /// callbacks ran.
    pub fn step(&mut self) -> usize {
        let due = self.timers.advance(STEP);
        let mut fired = 0;
        for id in due {
            let Some(callback) = self.timers.fire(id) else {
                continue;
            };
            fired += 1;
            let mut ctx = FxContext {
                timers: &mut self.timers,
                lights: &mut self.lights,
                area: &mut self.area,
                rng: &mut self.rng,
            };
            dispatch_callback(callback, &mut self.flickers, &mut self.rumble, &mut ctx);
        }
        fired
    }

    pub fn light(&self, id: u32) -> LightState {
        *self
            .lights
            .get(LightId(id))
            .unwrap_or_else(|| panic!("light {id} should exist"))
    }
}

// ---------------------------------------------------------------------------
// TestStage
// ---------------------------------------------------------------------------

/// A headless Bevy App wrapping `EffectsPlugin`. Every `tick()` advances the
/// clock by exactly [`STEP`].
pub struct TestStage {
    app: App,
}

impl TestStage {
    pub fn new() -> Self {
        Self::with_config(FxConfig::default())
    }

    pub fn with_config(config: FxConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
        app.add_plugins(EffectsPlugin::with_config(config));
        // First update initialises the clocks; no timers are registered yet.
        app.update();
        Self { app }
    }

    pub fn with_light(mut self, id: u32, x: i32, y: i32, alpha: u8) -> Self {
        self.app
            .world_mut()
            .resource_mut::<LightTable>()
            .insert(LightId(id), LightState::new(x, y, alpha));
        self
    }

    pub fn remove_light(&mut self, id: u32) {
        self.app
            .world_mut()
            .resource_mut::<LightTable>()
            .remove(LightId(id));
    }

    /// Run `n` frames.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Call the managers directly, outside any system.
    pub fn with_effects<R>(
        &mut self,
        f: impl FnOnce(&mut FlickerManager, &mut RumbleManager, &mut FxContext<'_>) -> R,
    ) -> R {
        let mut state: SystemState<(
            ResMut<TickTable>,
            ResMut<LightTable>,
            ResMut<AreaView>,
            ResMut<FxRng>,
            ResMut<FlickerManager>,
            ResMut<RumbleManager>,
        )> = SystemState::new(self.app.world_mut());
        let (mut timers, mut lights, mut area, mut rng, mut flickers, mut rumble) =
            state.get_mut(self.app.world_mut());
        let mut ctx = FxContext {
            timers: &mut *timers,
            lights: &mut *lights,
            area: &mut *area,
            rng: &mut rng.0,
        };
        f(&mut *flickers, &mut *rumble, &mut ctx)
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn light(&self, id: u32) -> LightState {
        *self
            .resource::<LightTable>()
            .get(LightId(id))
            .unwrap_or_else(|| panic!("light {id} should exist"))
    }

    pub fn offset(&self) -> IVec2 {
        self.resource::<AreaView>().offset
    }

    /// Read and clear the area's dirty flag, as the renderer would.
    pub fn take_changed(&mut self) -> bool {
        self.app.world_mut().resource_mut::<AreaView>().take_changed()
    }

    /// Drain the `FlickerStartedEvent`s sent since the last call.
    pub fn started_flickers(&mut self) -> Vec<FlickerStartedEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<FlickerStartedEvent>>()
            .drain()
            .collect()
    }
}
