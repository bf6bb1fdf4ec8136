//! Timer service seam and the in-memory tick table behind it.
//!
//! Callbacks are data: a registration carries an [`FxCallback`] and the host
//! routes it to the owning manager when the registration comes due. The
//! [`TickTable`] is advanced once per frame by the plugin:
//!
//! ```text
//! for id in table.advance(dt) {
//!     if let Some(callback) = table.fire(id) { dispatch(callback) }
//! }
//! ```
//!
//! `fire` re-checks the registration, so a callback unregistered by an earlier
//! callback of the same advance is never dispatched.

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::prelude::*;

use crate::error::FxError;
use crate::handle::EffectHandle;

/// Token returned by a registration; the only way to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// What a registration does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxCallback {
    FlickerTick(EffectHandle),
    FlickerExpire(EffectHandle),
    RumbleTick { intensity: i32 },
    RumbleExpire,
}

/// Periodic/one-shot callback registration.
pub trait TimerService {
    fn register_periodic(&mut self, period: Duration, callback: FxCallback) -> CallbackId;
    fn register_once(&mut self, delay: Duration, callback: FxCallback) -> CallbackId;
    /// Cancel a registration. Unknown ids are a no-op.
    fn unregister(&mut self, id: CallbackId);
}

/// Convert an update rate into a tick period, rejecting rates that are
/// non-finite, not positive, or above `max_rate_hz`.
pub fn period_for_rate(rate_hz: f32, max_rate_hz: f32) -> Result<Duration, FxError> {
    if !rate_hz.is_finite() || rate_hz <= 0.0 || rate_hz > max_rate_hz {
        return Err(FxError::InvalidRate(rate_hz));
    }
    Duration::try_from_secs_f64(1.0 / f64::from(rate_hz))
        .ok()
        .filter(|period| !period.is_zero())
        .ok_or(FxError::InvalidRate(rate_hz))
}

/// Convert an optional duration in seconds into a `Duration`.
pub fn expiry_delay(duration_secs: Option<f32>) -> Result<Option<Duration>, FxError> {
    duration_secs
        .map(|secs| {
            Duration::try_from_secs_f64(f64::from(secs)).map_err(|_| FxError::InvalidDuration(secs))
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// TickTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TimerEntry {
    interval: Duration,
    elapsed: Duration,
    once: bool,
    callback: FxCallback,
}

/// Ordered registration table. Iteration order is registration order, which
/// makes same-frame ordering (tick before expiry) deterministic.
#[derive(Resource, Debug, Default)]
pub struct TickTable {
    next_id: u64,
    entries: BTreeMap<CallbackId, TimerEntry>,
}

impl TickTable {
    fn insert(&mut self, interval: Duration, once: bool, callback: FxCallback) -> CallbackId {
        self.next_id += 1;
        let id = CallbackId(self.next_id);
        self.entries.insert(
            id,
            TimerEntry {
                interval,
                elapsed: Duration::ZERO,
                once,
                callback,
            },
        );
        id
    }

    /// Advance every registration by `dt` and return the ids that came due,
    /// in registration order. A periodic entry fires at most once per advance
    /// and keeps the sub-period remainder; it never bursts to catch up.
    pub fn advance(&mut self, dt: Duration) -> Vec<CallbackId> {
        let mut due = Vec::new();
        for (id, entry) in self.entries.iter_mut() {
            entry.elapsed += dt;
            if entry.elapsed < entry.interval {
                continue;
            }
            due.push(*id);
            if !entry.once {
                let interval = entry.interval.as_nanos();
                let rem = entry.elapsed.as_nanos().checked_rem(interval).unwrap_or(0);
                entry.elapsed = Duration::from_nanos(rem as u64);
            }
        }
        due
    }

    /// Take the callback for a due registration. One-shot entries are removed.
    /// Returns `None` if the registration was cancelled in the meantime.
    pub fn fire(&mut self, id: CallbackId) -> Option<FxCallback> {
        let entry = self.entries.get(&id)?;
        let callback = entry.callback;
        if entry.once {
            self.entries.remove(&id);
        }
        Some(callback)
    }

    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TimerService for TickTable {
    fn register_periodic(&mut self, period: Duration, callback: FxCallback) -> CallbackId {
        self.insert(period, false, callback)
    }

    fn register_once(&mut self, delay: Duration, callback: FxCallback) -> CallbackId {
        self.insert(delay, true, callback)
    }

    fn unregister(&mut self, id: CallbackId) {
        if self.entries.remove(&id).is_none() {
            trace!("TickTable: unregister of unknown callback {:?} ignored", id);
        }
    }
}
