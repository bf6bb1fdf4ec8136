//! Viewport rumble: random, reversible perturbation of the render offset.
//! At most one rumble runs at a time.

mod manager;


pub use manager::{random_offset, RumbleManager, RumbleState};
