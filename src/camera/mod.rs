//! Third-person Follow Camera
//!
//! Orbits a target under mouse control, pulls in when geometry sits
//! between the target and the desired position, shakes slightly while the
//! player moves, and eases toward the result with critically damped
//! smoothing. Its orientation doubles as the movement basis for the
//! reindeer controller.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::math::{euler_degrees, look_rotation, smooth_damp_vec3};
use crate::host::{LayerMask, PhysicsWorld};
use crate::reindeer::CameraBasis;

// =============================================================================
// CONFIG
// =============================================================================

/// Follow camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowCameraConfig {
    /// Offset from the target before orbit rotation.
    pub offset: Vec3,
    /// Degrees per unit of mouse delta.
    pub sensitivity: f32,
    /// Lowest pitch (degrees).
    pub pitch_min: f32,
    /// Highest pitch (degrees).
    pub pitch_max: f32,
    /// Pitch at spawn (degrees).
    pub initial_pitch: f32,
    /// Position smoothing time constant (seconds).
    pub smooth_time: f32,
    /// Closest the camera may be pulled in.
    pub min_distance: f32,
    /// Collision probe length and farthest pulled-in distance.
    pub max_distance: f32,
    /// Gap kept between the camera and a blocking surface.
    pub wall_clearance: f32,
    /// Layers that block the camera.
    pub collision_mask: LayerMask,
    /// Shake amplitude (meters).
    pub shake_intensity: f32,
    /// Shake phase advance per second.
    pub shake_speed: f32,
    /// Look-at point height above the target.
    pub look_height: f32,
}

impl Default for FollowCameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 2.0, -4.0),
            sensitivity: 3.0,
            pitch_min: -45.0,
            pitch_max: 60.0,
            initial_pitch: 10.0,
            smooth_time: 0.07,
            min_distance: 1.0,
            max_distance: 4.0,
            wall_clearance: 0.2,
            collision_mask: LayerMask::DEFAULT,
            shake_intensity: 0.05,
            shake_speed: 15.0,
            look_height: 1.5,
        }
    }
}

// =============================================================================
// CAMERA
// =============================================================================

/// Per-frame camera input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraInput {
    /// Mouse delta X.
    pub look_x: f32,
    /// Mouse delta Y.
    pub look_y: f32,
    /// Raw movement axes are non-zero this frame.
    pub moving: bool,
}

/// Follow camera state.
#[derive(Clone, Debug)]
pub struct FollowCamera {
    config: FollowCameraConfig,
    yaw: f32,
    pitch: f32,
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    shake_timer: f32,
    desired: Vec3,
}

impl FollowCamera {
    /// Camera snapped to its unobstructed spot behind `target`.
    pub fn new(config: FollowCameraConfig, target: Vec3) -> Self {
        let pitch = config.initial_pitch.clamp(config.pitch_min, config.pitch_max);
        let desired = target + euler_degrees(pitch, 0.0, 0.0) * config.offset;
        let rotation = look_rotation(target + Vec3::Y * config.look_height - desired);
        Self {
            config,
            yaw: 0.0,
            pitch,
            position: desired,
            rotation,
            velocity: Vec3::ZERO,
            shake_timer: 0.0,
            desired,
        }
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Orbit yaw (degrees).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Orbit pitch (degrees).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Collision-resolved goal of the last update, before shake.
    pub fn desired_position(&self) -> Vec3 {
        self.desired
    }

    /// Accumulated shake phase.
    pub fn shake_timer(&self) -> f32 {
        self.shake_timer
    }

    /// Movement axes for a controller steered by this camera.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_rotation(self.rotation)
    }

    /// Late update: orbit, collide, shake, smooth, look at the target.
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        dt: f32,
        input: &CameraInput,
        target: Vec3,
        world: &W,
    ) {
        self.yaw += input.look_x * self.config.sensitivity;
        self.pitch = (self.pitch - input.look_y * self.config.sensitivity)
            .clamp(self.config.pitch_min, self.config.pitch_max);

        let orbit = euler_degrees(self.pitch, self.yaw, 0.0);
        self.desired = self.resolve_collision(target, target + orbit * self.config.offset, world);

        let mut shake = Vec3::ZERO;
        if input.moving {
            self.shake_timer += dt * self.config.shake_speed;
            shake = Vec3::new(self.shake_timer.sin(), (self.shake_timer * 1.3).cos(), 0.0)
                * self.config.shake_intensity;
        }

        self.position = smooth_damp_vec3(
            self.position,
            self.desired + shake,
            &mut self.velocity,
            self.config.smooth_time,
            dt,
        );
        self.rotation = look_rotation(target + Vec3::Y * self.config.look_height - self.position);
    }

    fn resolve_collision<W: PhysicsWorld + ?Sized>(
        &self,
        target: Vec3,
        desired: Vec3,
        world: &W,
    ) -> Vec3 {
        let direction = (desired - target).normalize_or_zero();
        if direction == Vec3::ZERO {
            return desired;
        }
        match world.raycast(target, direction, self.config.max_distance, self.config.collision_mask) {
            Some(hit) => {
                let distance = (hit.distance - self.config.wall_clearance)
                    .clamp(self.config.min_distance, self.config.max_distance);
                target + direction * distance
            }
            None => desired,
        }
    }
}
