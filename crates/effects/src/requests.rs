//! Effect requests as Bevy events.
//!
//! Gameplay code that only has an `EventWriter` sends these instead of
//! borrowing the managers directly. They are applied once per frame by
//! `apply_effect_requests`, before the timers advance.

use bevy::prelude::*;

use crate::flicker::FlickerRange;
use crate::handle::EffectHandle;
use crate::targets::LightId;

#[derive(Event, Debug, Clone)]
pub struct StartFlickerEvent {
    pub light: LightId,
    pub range: FlickerRange,
    pub rate_hz: f32,
    pub duration_secs: Option<f32>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EndFlickerEvent(pub EffectHandle);

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetFlickersEvent;

#[derive(Event, Debug, Clone)]
pub struct StartRumbleEvent {
    pub rate_hz: f32,
    pub intensity: i32,
    pub duration_secs: Option<f32>,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StopRumbleEvent;

/// Sent when a `StartFlickerEvent` was accepted, carrying the handle needed
/// to end that flicker early.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerStartedEvent {
    pub light: LightId,
    pub handle: EffectHandle,
}
