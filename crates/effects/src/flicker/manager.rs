use std::collections::HashMap;

use bevy::prelude::*;

use crate::config::DEFAULT_MAX_RATE_HZ;
use crate::context::FxContext;
use crate::error::FxError;
use crate::handle::{EffectHandle, HandleAllocator};
use crate::targets::{LightId, LightState};
use crate::timer::{expiry_delay, period_for_rate, FxCallback, TimerService};

use super::types::{perturb, FlickerEntry, FlickerRange};

/// Owns every active light flicker.
///
/// A handle is active exactly while it is in `active`; leaving that map always
/// goes through [`FlickerManager::remove`], which unregisters the handle's
/// periodic and expiry callbacks.
#[derive(Resource, Debug)]
pub struct FlickerManager {
    max_rate_hz: f32,
    handles: HandleAllocator,
    active: HashMap<EffectHandle, FlickerEntry>,
}

impl Default for FlickerManager {
    fn default() -> Self {
        Self::with_max_rate(DEFAULT_MAX_RATE_HZ)
    }
}

impl FlickerManager {
    pub fn with_max_rate(max_rate_hz: f32) -> Self {
        Self {
            max_rate_hz,
            handles: HandleAllocator::default(),
            active: HashMap::new(),
        }
    }

    /// Shake a light around randomly while changing its alpha.
    ///
    /// Snapshots the light, then ticks at `rate_hz` until ended manually, by
    /// `duration_secs` elapsing, or by the light disappearing. A light carries
    /// at most one flicker: an existing one is ended (and its original
    /// restored) before the new snapshot is taken.
    pub fn start_flicker(
        &mut self,
        ctx: &mut FxContext<'_>,
        target: LightId,
        range: FlickerRange,
        rate_hz: f32,
        duration_secs: Option<f32>,
    ) -> Result<EffectHandle, FxError> {
        range.validate()?;
        let period = period_for_rate(rate_hz, self.max_rate_hz)?;
        let expiry = expiry_delay(duration_secs)?;

        if ctx.lights.light_mut(target).is_none() {
            return Err(FxError::UnknownLight(target));
        }
        if let Some(previous) = self.flicker_on(target) {
            debug!("Flicker {} on light {} replaced", previous.id, target);
            self.end_flicker(ctx, previous);
        }
        let original = *ctx
            .lights
            .light_mut(target)
            .ok_or(FxError::UnknownLight(target))?;

        let handle = self.handles.allocate(target);
        let tick = ctx
            .timers
            .register_periodic(period, FxCallback::FlickerTick(handle));
        let expiry =
            expiry.map(|delay| ctx.timers.register_once(delay, FxCallback::FlickerExpire(handle)));
        self.active.insert(
            handle,
            FlickerEntry {
                original,
                range,
                tick,
                expiry,
            },
        );

        debug!(
            "Flicker {} started on light {} at {} Hz (duration {:?})",
            handle.id, target, rate_hz, duration_secs
        );
        Ok(handle)
    }

    /// One periodic update. A light that no longer resolves ends the flicker
    /// without restoring anything.
    pub fn tick(&mut self, ctx: &mut FxContext<'_>, handle: EffectHandle) {
        let Some((original, range)) = self.active.get(&handle).map(|e| (e.original, e.range))
        else {
            return;
        };
        let Some(light) = ctx.lights.light_mut(handle.target) else {
            debug!(
                "Light {} vanished; flicker {} dropped without restore",
                handle.target, handle.id
            );
            self.remove(ctx.timers, handle);
            return;
        };
        *light = perturb(original, range, ctx.rng);
        ctx.area.mark_dirty();
    }

    /// End a flicker and restore the light's original state.
    ///
    /// Idempotent: ending an unknown or already-ended handle does nothing.
    /// Returns `true` if the original state was written back.
    pub fn end_flicker(&mut self, ctx: &mut FxContext<'_>, handle: EffectHandle) -> bool {
        let Some(entry) = self.remove(ctx.timers, handle) else {
            return false;
        };
        match ctx.lights.light_mut(handle.target) {
            Some(light) => {
                *light = entry.original;
                ctx.area.mark_dirty();
                debug!("Flicker {} ended; light {} restored", handle.id, handle.target);
                true
            }
            None => {
                debug!(
                    "Flicker {} ended; light {} is gone, nothing to restore",
                    handle.id, handle.target
                );
                false
            }
        }
    }

    /// End every active flicker, restoring each light. No-op when idle.
    pub fn reset_all_flickers(&mut self, ctx: &mut FxContext<'_>) {
        let handles: Vec<EffectHandle> = self.active.keys().copied().collect();
        for handle in handles {
            self.end_flicker(ctx, handle);
        }
    }

    pub fn is_active(&self, handle: EffectHandle) -> bool {
        self.active.contains_key(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The active flicker on `target`, if any.
    pub fn flicker_on(&self, target: LightId) -> Option<EffectHandle> {
        self.active.keys().copied().find(|h| h.target == target)
    }

    /// The snapshot an active flicker will restore.
    pub fn original_state(&self, handle: EffectHandle) -> Option<LightState> {
        self.active.get(&handle).map(|e| e.original)
    }

    fn remove(&mut self, timers: &mut dyn TimerService, handle: EffectHandle) -> Option<FlickerEntry> {
        let entry = self.active.remove(&handle)?;
        timers.unregister(entry.tick);
        if let Some(expiry) = entry.expiry {
            timers.unregister(expiry);
        }
        Some(entry)
    }
}
