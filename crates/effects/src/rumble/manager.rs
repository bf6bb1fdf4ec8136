use bevy::prelude::*;
use rand::{Rng, RngCore};

use crate::config::DEFAULT_MAX_RATE_HZ;
use crate::context::FxContext;
use crate::error::FxError;
use crate::timer::{expiry_delay, period_for_rate, CallbackId, FxCallback, TimerService};

/// Observable rumble state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RumbleState {
    pub rumbling: bool,
    pub pending_stop_scheduled: bool,
}

/// Owns the single viewport rumble. Starting a rumble replaces any running one.
#[derive(Resource, Debug)]
pub struct RumbleManager {
    max_rate_hz: f32,
    tick: Option<CallbackId>,
    pending_stop: Option<CallbackId>,
}

impl Default for RumbleManager {
    fn default() -> Self {
        Self::with_max_rate(DEFAULT_MAX_RATE_HZ)
    }
}

impl RumbleManager {
    pub fn with_max_rate(max_rate_hz: f32) -> Self {
        Self {
            max_rate_hz,
            tick: None,
            pending_stop: None,
        }
    }

    pub fn state(&self) -> RumbleState {
        RumbleState {
            rumbling: self.tick.is_some(),
            pending_stop_scheduled: self.pending_stop.is_some(),
        }
    }

    pub fn is_rumbling(&self) -> bool {
        self.tick.is_some()
    }

    /// Rumble the viewport: every `1 / rate_hz` seconds the offset jumps to a
    /// random point within `intensity` of the origin. With `duration_secs` the
    /// rumble stops by itself.
    ///
    /// Invalid arguments are rejected before the running rumble is touched.
    pub fn start_rumble(
        &mut self,
        ctx: &mut FxContext<'_>,
        rate_hz: f32,
        intensity: i32,
        duration_secs: Option<f32>,
    ) -> Result<(), FxError> {
        if intensity < 0 {
            return Err(FxError::NegativeIntensity(intensity));
        }
        let period = period_for_rate(rate_hz, self.max_rate_hz)?;
        let expiry = expiry_delay(duration_secs)?;

        self.stop_rumble(ctx);

        self.tick = Some(
            ctx.timers
                .register_periodic(period, FxCallback::RumbleTick { intensity }),
        );
        self.pending_stop = expiry.map(|delay| ctx.timers.register_once(delay, FxCallback::RumbleExpire));

        debug!(
            "Rumble started at {} Hz, intensity {} (duration {:?})",
            rate_hz, intensity, duration_secs
        );
        Ok(())
    }

    pub fn tick(&mut self, ctx: &mut FxContext<'_>, intensity: i32) {
        if !self.is_rumbling() {
            return;
        }
        ctx.area.set_offset(random_offset(intensity, ctx.rng));
        ctx.area.mark_dirty();
    }

    /// Stop rumbling right away and recenter the viewport. Stopping an idle
    /// viewport is a valid terminal state, so this always returns `true`.
    pub fn stop_rumble(&mut self, ctx: &mut FxContext<'_>) -> bool {
        if let Some(tick) = self.tick.take() {
            ctx.timers.unregister(tick);
            ctx.area.set_offset(IVec2::ZERO);
            ctx.area.mark_dirty();
            debug!("Rumble stopped");
        }
        self.cancel_pending_stop(ctx.timers);
        true
    }

    /// The scheduled stop came due.
    pub fn expire(&mut self, ctx: &mut FxContext<'_>) {
        self.stop_rumble(ctx);
    }

    fn cancel_pending_stop(&mut self, timers: &mut dyn TimerService) {
        if let Some(pending) = self.pending_stop.take() {
            timers.unregister(pending);
        }
    }
}

/// A random offset with both components in `[-intensity, intensity]`.
pub fn random_offset(intensity: i32, rng: &mut dyn RngCore) -> IVec2 {
    let intensity = intensity.max(0);
    IVec2::new(
        rng.gen_range(-intensity..=intensity),
        rng.gen_range(-intensity..=intensity),
    )
}
