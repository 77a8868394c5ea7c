//! Animator parameters and state ids used by the reindeer graph, plus the
//! once-per-physics-tick parameter projection.

use crate::core::math::smooth_damp;
use crate::host::{Animator, StateId};
use crate::reindeer::config::ReindeerConfig;
use crate::reindeer::state::LocomotionState;

/// Float: locomotion blend speed.
pub const PARAM_SPEED: &str = "Speed";
/// Bool: ground contact.
pub const PARAM_IS_GROUNDED: &str = "IsGrounded";
/// Trigger: jump.
pub const PARAM_JUMP: &str = "Jump";
/// Trigger: attack.
pub const PARAM_ATTACK: &str = "Attack";
/// Trigger: death.
pub const PARAM_DIE: &str = "Die";
/// Trigger: idle-break variation.
pub const PARAM_IDLE_BREAK: &str = "IdleBreak";
/// Bool: eating interaction active.
pub const PARAM_IS_EATING: &str = "IsEating";
/// Trigger: enter eating.
pub const PARAM_EAT_TRIGGER: &str = "EatTrigger";

/// Base idle state.
pub const STATE_IDLE: StateId = StateId::from_name("Idle");
/// Eating entry.
pub const STATE_EATING_IN: StateId = StateId::from_name("Eating_In");
/// Eating loop.
pub const STATE_EATING_LOOP: StateId = StateId::from_name("Eating_Loop");
/// Eating exit.
pub const STATE_EATING_OUT: StateId = StateId::from_name("Eating_Out");

/// Smoothed `Speed` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeedParameter {
    value: f32,
    velocity: f32,
}

impl SpeedParameter {
    /// Last written value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target value for the current input.
    pub fn target(state: &LocomotionState, config: &ReindeerConfig) -> f32 {
        if state.input_magnitude() > config.input_threshold {
            if state.running {
                config.animator_run_speed
            } else {
                config.animator_walk_speed
            }
        } else {
            0.0
        }
    }

    /// Advance toward the target and return the value to write.
    pub fn update(&mut self, state: &LocomotionState, config: &ReindeerConfig, dt: f32) -> f32 {
        let target = Self::target(state, config);
        self.value = smooth_damp(self.value, target, &mut self.velocity, config.speed_damp_time, dt);
        if self.value < config.speed_snap_epsilon {
            self.value = 0.0;
        }
        self.value
    }
}

/// Write `Speed` and `IsGrounded`.
pub fn project_parameters<A: Animator + ?Sized>(
    animator: &mut A,
    speed: &mut SpeedParameter,
    state: &LocomotionState,
    config: &ReindeerConfig,
    dt: f32,
) {
    let value = speed.update(state, config, dt);
    animator.set_float(PARAM_SPEED, value);
    animator.set_bool(PARAM_IS_GROUNDED, state.grounded);
}
