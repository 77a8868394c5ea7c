//! Santa tuning values.

use serde::{Deserialize, Serialize};

/// Configuration for the first-person Santa controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SantaConfig {
    /// Walking speed (meters/second).
    pub walk_speed: f32,
    /// Sprint speed as a multiple of walking speed.
    pub run_multiplier: f32,
    /// Degrees of rotation per unit of mouse delta.
    pub mouse_sensitivity: f32,

    /// Full stamina.
    pub max_stamina: f32,
    /// Stamina drained per second while sprinting.
    pub stamina_decrease_rate: f32,
    /// Stamina regained per second while not sprinting.
    pub stamina_recover_rate: f32,
    /// Lockout after running dry before regeneration resumes (seconds).
    pub stamina_recovery_delay: f32,

    /// Highest look pitch (degrees).
    pub max_look_up: f32,
    /// Lowest look pitch (degrees).
    pub max_look_down: f32,

    /// Vertical acceleration (meters/second², negative is down).
    pub gravity: f32,
    /// Vertical velocity held while standing on ground.
    pub grounded_stick_velocity: f32,
    /// Flat speeds below this are reported to the animator as zero.
    pub speed_snap_epsilon: f32,
}

impl Default for SantaConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_multiplier: 1.5,
            mouse_sensitivity: 2.0,

            max_stamina: 100.0,
            stamina_decrease_rate: 20.0,
            stamina_recover_rate: 10.0,
            stamina_recovery_delay: 0.5,

            max_look_up: 80.0,
            max_look_down: -80.0,

            gravity: -9.81,
            grounded_stick_velocity: -2.0,
            speed_snap_epsilon: 0.05,
        }
    }
}
