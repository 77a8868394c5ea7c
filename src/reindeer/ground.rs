//! Ground detection.
//!
//! A sphere probe below the pivot, tested against the ground mask once per
//! frame. Only the grounded flag feeds back into the controller (jump and
//! idle gating); the edges are reported for hooks.

use glam::Vec3;
#[cfg(feature = "debug-tracing")]
use tracing::trace;
use tracing::debug;

use crate::host::PhysicsWorld;
use crate::reindeer::config::ReindeerConfig;
use crate::reindeer::events::ReindeerEvent;
use crate::reindeer::state::LocomotionState;

/// Probe centre for a pivot position.
#[inline]
pub fn probe_center(pivot: Vec3, config: &ReindeerConfig) -> Vec3 {
    pivot - Vec3::Y * config.ground_check_offset
}

/// Refresh `state.grounded` and report an edge, if any.
pub fn update_ground<W: PhysicsWorld + ?Sized>(
    state: &mut LocomotionState,
    world: &W,
    pivot: Vec3,
    config: &ReindeerConfig,
) -> Option<ReindeerEvent> {
    let was_grounded = state.grounded;
    state.grounded = world.overlap_sphere(
        probe_center(pivot, config),
        config.ground_check_radius,
        config.ground_mask,
    );

    #[cfg(feature = "debug-tracing")]
    trace!(grounded = state.grounded, "ground probe");

    match (was_grounded, state.grounded) {
        (false, true) => {
            debug!("reindeer landed");
            Some(ReindeerEvent::Landed)
        }
        (true, false) => {
            debug!("reindeer left the ground");
            Some(ReindeerEvent::LeftGround)
        }
        _ => None,
    }
}
