//! Movement integration and gravity shaping (physics step).

use glam::{Quat, Vec3};

use crate::core::math::{flatten, horizontal, lerp, lerp_vec3, look_rotation, slerp_toward};
use crate::host::RigidBody;
use crate::reindeer::config::ReindeerConfig;
use crate::reindeer::state::LocomotionState;

/// Camera-relative movement axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Camera forward (any pitch; flattened before use).
    pub forward: Vec3,
    /// Camera right (flattened before use).
    pub right: Vec3,
}

impl CameraBasis {
    /// World axes: forward +Z, right +X.
    pub const WORLD: Self = Self { forward: Vec3::Z, right: Vec3::X };

    /// Basis of a camera with the given orientation.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::Z,
            right: rotation * Vec3::X,
        }
    }

    /// World direction for normalized input `(x = right, y = forward)`.
    pub fn direction(&self, state: &LocomotionState) -> Vec3 {
        let forward = flatten(self.forward);
        let right = flatten(self.right);
        (forward * state.move_input.y + right * state.move_input.x).normalize_or_zero()
    }
}

/// Steer horizontal velocity and facing toward the input direction.
///
/// Vertical velocity is preserved.
pub fn integrate_movement<B: RigidBody + ?Sized>(
    state: &LocomotionState,
    body: &mut B,
    basis: CameraBasis,
    dt: f32,
    config: &ReindeerConfig,
) {
    let velocity = body.velocity();
    let blend = dt * config.velocity_blend_rate;

    if state.input_magnitude() < config.input_threshold {
        body.set_velocity(Vec3::new(
            lerp(velocity.x, 0.0, blend),
            velocity.y,
            lerp(velocity.z, 0.0, blend),
        ));
        return;
    }

    let target_speed = if state.running { config.run_speed } else { config.walk_speed };
    let direction = basis.direction(state);

    if direction != Vec3::ZERO {
        let target = look_rotation(direction);
        body.set_rotation(slerp_toward(body.rotation(), target, config.turn_speed * dt));
    }

    let planar = lerp_vec3(horizontal(velocity), direction * target_speed, blend);
    body.set_velocity(Vec3::new(planar.x, velocity.y, planar.z));
}

/// Extra gravity for a snappier arc: one multiplier rising, a larger one falling.
///
/// Returns the acceleration that was queued (zero while `vy == 0`).
pub fn apply_gravity_shaping<B: RigidBody + ?Sized>(
    body: &mut B,
    gravity: Vec3,
    config: &ReindeerConfig,
) -> Vec3 {
    let vy = body.velocity().y;
    let scale = if vy > 0.0 {
        config.gravity_multiplier - 1.0
    } else if vy < 0.0 {
        config.fall_multiplier - 1.0
    } else {
        return Vec3::ZERO;
    };
    let accel = Vec3::Y * gravity.y * scale;
    body.add_acceleration(accel);
    accel
}
