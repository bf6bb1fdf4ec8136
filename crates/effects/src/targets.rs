//! Effect targets: lights, the viewport, and the render surface dirty flag.
//!
//! The managers only see the [`LightRegistry`], [`Viewport`] and
//! [`RenderSurface`] traits. [`LightTable`] and [`AreaView`] are the in-memory
//! implementations the plugin installs; hosts with their own light model
//! implement the traits on their own types instead.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifier of a light in the host's light registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LightId(pub u32);

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of a light that effects perturb: position and transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub position: IVec2,
    pub alpha: u8,
}

impl LightState {
    pub fn new(x: i32, y: i32, alpha: u8) -> Self {
        Self {
            position: IVec2::new(x, y),
            alpha,
        }
    }
}

/// Lookup of mutable lights by id. Lights may disappear between ticks.
pub trait LightRegistry {
    fn light_mut(&mut self, id: LightId) -> Option<&mut LightState>;
}

/// Dirty-flag setter signalling that a redraw is needed.
pub trait RenderSurface {
    fn mark_dirty(&mut self);
}

/// Mutable access to the viewport render offset.
pub trait Viewport: RenderSurface {
    fn offset(&self) -> IVec2;
    fn set_offset(&mut self, offset: IVec2);
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// All lights of the current area, keyed by id.
#[derive(Resource, Debug, Default, Clone)]
pub struct LightTable {
    lights: HashMap<LightId, LightState>,
}

impl LightTable {
    pub fn insert(&mut self, id: LightId, light: LightState) -> Option<LightState> {
        self.lights.insert(id, light)
    }

    pub fn remove(&mut self, id: LightId) -> Option<LightState> {
        self.lights.remove(&id)
    }

    pub fn get(&self, id: LightId) -> Option<&LightState> {
        self.lights.get(&id)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

impl LightRegistry for LightTable {
    fn light_mut(&mut self, id: LightId) -> Option<&mut LightState> {
        self.lights.get_mut(&id)
    }
}

/// The currently displayed area: viewport offset plus the "changed" flag the
/// renderer polls once per frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct AreaView {
    pub offset: IVec2,
    pub changed: bool,
}

impl AreaView {
    /// Read and clear the dirty flag. Called by the renderer after redrawing.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl RenderSurface for AreaView {
    fn mark_dirty(&mut self) {
        self.changed = true;
    }
}

impl Viewport for AreaView {
    fn offset(&self) -> IVec2 {
        self.offset
    }

    fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset;
    }
}
