//! Reindeer tuning values.

use serde::{Deserialize, Serialize};

use crate::host::LayerMask;

/// Configuration for the reindeer controller.
///
/// Speeds in meters/second, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReindeerConfig {
    // ========================================================================
    // Movement
    // ========================================================================
    /// Walking speed.
    pub walk_speed: f32,
    /// Running speed (run key held).
    pub run_speed: f32,
    /// Upward impulse applied on jump.
    pub jump_force: f32,
    /// Facing slerp rate (per second).
    pub turn_speed: f32,
    /// Horizontal velocity blend rate (per second).
    pub velocity_blend_rate: f32,

    // ========================================================================
    // Gravity shaping
    // ========================================================================
    /// Gravity scale while ascending.
    pub gravity_multiplier: f32,
    /// Gravity scale while falling.
    pub fall_multiplier: f32,

    // ========================================================================
    // Ground check
    // ========================================================================
    /// Probe sphere radius.
    pub ground_check_radius: f32,
    /// Distance of the probe centre below the pivot.
    pub ground_check_offset: f32,
    /// Layers that count as ground.
    pub ground_mask: LayerMask,

    // ========================================================================
    // Idle breaks
    // ========================================================================
    /// Shortest wait before an idle-break animation.
    pub min_idle_wait: f32,
    /// Longest wait before an idle-break animation.
    pub max_idle_wait: f32,

    // ========================================================================
    // Jump
    // ========================================================================
    /// Minimum time between accepted jumps.
    pub jump_cooldown: f32,

    // ========================================================================
    // Animation
    // ========================================================================
    /// Input magnitude separating "moving" from "idle".
    pub input_threshold: f32,
    /// `Speed` parameter value while walking.
    pub animator_walk_speed: f32,
    /// `Speed` parameter value while running.
    pub animator_run_speed: f32,
    /// Damp time for the `Speed` parameter.
    pub speed_damp_time: f32,
    /// `Speed` values below this are written as exactly zero.
    pub speed_snap_epsilon: f32,
}

impl Default for ReindeerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            jump_force: 8.0,
            turn_speed: 10.0,
            velocity_blend_rate: 10.0,

            gravity_multiplier: 2.5,
            fall_multiplier: 5.0,

            ground_check_radius: 0.1,
            ground_check_offset: 0.1,
            ground_mask: LayerMask::DEFAULT,

            min_idle_wait: 5.0,
            max_idle_wait: 10.0,

            jump_cooldown: 1.0,

            input_threshold: 0.1,
            animator_walk_speed: 1.0,
            animator_run_speed: 2.0,
            speed_damp_time: 0.1,
            speed_snap_epsilon: 0.01,
        }
    }
}
