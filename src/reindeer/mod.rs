//! Reindeer Locomotion & Interaction
//!
//! Third-person physics controller for the reindeer role. The controller
//! owns a [`LocomotionState`] and talks to the host only through the
//! [`crate::host`] traits.
//!
//! ## Module Structure
//!
//! - `config`: tuning values
//! - `input`: per-frame input snapshot
//! - `state`: locomotion state and eating phase
//! - `ground`: ground probe and landed/left edges
//! - `movement`: camera-relative movement and gravity shaping
//! - `jump`: grounded + cooldown jump gate
//! - `eating`: eating interaction and completion detector
//! - `idle`: randomized idle-break timer
//! - `animator`: parameter names, state ids and projection
//! - `events`: notifications emitted per tick
//! - `controller`: the tick entry points

pub mod animator;
pub mod config;
pub mod controller;
pub mod eating;
pub mod events;
pub mod ground;
pub mod idle;
pub mod input;
pub mod jump;
pub mod movement;
pub mod state;

#[cfg(test)]
mod properties;

pub use config::ReindeerConfig;
pub use controller::{FrameContext, ReindeerController};
pub use events::{CancelReason, ReindeerEvent};
pub use input::ReindeerInput;
pub use movement::CameraBasis;
pub use state::{EatingPhase, LocomotionState};
