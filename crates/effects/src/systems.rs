use bevy::prelude::*;

use crate::context::FxContext;
use crate::flicker::FlickerManager;
use crate::fx_rng::FxRng;
use crate::requests::{
    EndFlickerEvent, FlickerStartedEvent, ResetFlickersEvent, StartFlickerEvent,
    StartRumbleEvent, StopRumbleEvent,
};
use crate::rumble::RumbleManager;
use crate::targets::{AreaView, LightTable};
use crate::timer::{FxCallback, TickTable};

/// Route a fired callback to the manager that registered it.
pub fn dispatch_callback(
    callback: FxCallback,
    flickers: &mut FlickerManager,
    rumble: &mut RumbleManager,
    ctx: &mut FxContext<'_>,
) {
    match callback {
        FxCallback::FlickerTick(handle) => flickers.tick(ctx, handle),
        FxCallback::FlickerExpire(handle) => {
            flickers.end_flicker(ctx, handle);
        }
        FxCallback::RumbleTick { intensity } => rumble.tick(ctx, intensity),
        FxCallback::RumbleExpire => rumble.expire(ctx),
    }
}

/// System: advance the tick table by this frame's delta and run every due
/// callback that is still registered.
pub fn drive_effect_timers(
    time: Res<Time>,
    mut timers: ResMut<TickTable>,
    mut lights: ResMut<LightTable>,
    mut area: ResMut<AreaView>,
    mut rng: ResMut<FxRng>,
    mut flickers: ResMut<FlickerManager>,
    mut rumble: ResMut<RumbleManager>,
) {
    if timers.is_empty() {
        return;
    }
    let due = timers.advance(time.delta());
    for id in due {
        let Some(callback) = timers.fire(id) else {
            continue;
        };
        let mut ctx = FxContext {
            timers: &mut *timers,
            lights: &mut *lights,
            area: &mut *area,
            rng: &mut rng.0,
        };
        dispatch_callback(callback, &mut *flickers, &mut *rumble, &mut ctx);
    }
}

/// System: apply queued effect requests.
///
/// Flicker resets and ends are applied before starts, and a rumble stop
/// before a rumble start, so "stop then start" sent in one frame behaves
/// the same as across two frames. Rejected requests are logged and dropped.
#[allow(clippy::too_many_arguments)]
pub fn apply_effect_requests(
    mut resets: EventReader<ResetFlickersEvent>,
    mut ends: EventReader<EndFlickerEvent>,
    mut starts: EventReader<StartFlickerEvent>,
    mut rumble_stops: EventReader<StopRumbleEvent>,
    mut rumble_starts: EventReader<StartRumbleEvent>,
    mut started: EventWriter<FlickerStartedEvent>,
    mut timers: ResMut<TickTable>,
    mut lights: ResMut<LightTable>,
    mut area: ResMut<AreaView>,
    mut rng: ResMut<FxRng>,
    mut flickers: ResMut<FlickerManager>,
    mut rumble: ResMut<RumbleManager>,
) {
    let mut ctx = FxContext {
        timers: &mut *timers,
        lights: &mut *lights,
        area: &mut *area,
        rng: &mut rng.0,
    };

    if resets.read().count() > 0 {
        flickers.reset_all_flickers(&mut ctx);
    }
    for EndFlickerEvent(handle) in ends.read() {
        flickers.end_flicker(&mut ctx, *handle);
    }
    for req in starts.read() {
        match flickers.start_flicker(&mut ctx, req.light, req.range, req.rate_hz, req.duration_secs) {
            Ok(handle) => {
                started.send(FlickerStartedEvent {
                    light: req.light,
                    handle,
                });
            }
            Err(e) => warn!("Flicker request for light {} rejected: {}", req.light, e),
        }
    }

    if rumble_stops.read().count() > 0 {
        rumble.stop_rumble(&mut ctx);
    }
    for req in rumble_starts.read() {
        if let Err(e) = rumble.start_rumble(&mut ctx, req.rate_hz, req.intensity, req.duration_secs)
        {
            warn!("Rumble request rejected: {}", e);
        }
    }
}
