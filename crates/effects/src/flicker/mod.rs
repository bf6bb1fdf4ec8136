//! Light flicker: random, reversible perturbation of a light's position and
//! alpha, updated periodically and restored exactly when it ends.

mod manager;
mod types;


pub use manager::FlickerManager;
pub use types::{perturb, FlickerRange};
