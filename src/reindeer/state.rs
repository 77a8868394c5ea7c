//! Reindeer Locomotion State
//!
//! Per-creature mutable state. Created at spawn, mutated once per tick by
//! the controller, dropped with the creature.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::host::StateId;

/// Where the eating interaction currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EatingPhase {
    /// Not eating.
    NotEating,
    /// Eating flag set, animator not yet in its exit state.
    Eating,
    /// Eating flag set and the animator reports the exit state.
    EatingExit,
}

/// State of a single reindeer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Normalized movement input from the last frame.
    pub move_input: Vec2,
    /// Run key held.
    pub running: bool,
    /// Ground probe result from the last frame.
    pub grounded: bool,
    /// Dead creatures ignore all input and stop ticking.
    pub dead: bool,
    /// Eating interaction active.
    pub eating: bool,
    /// Animator state reported on the previous frame.
    pub previous_state: StateId,
    /// Animator state reported on this frame.
    pub current_state: StateId,
    /// Accumulated idle time.
    pub idle_timer: f32,
    /// Idle time at which the next idle break fires.
    pub next_idle_time: f32,
    /// Earliest time a jump is accepted.
    pub next_jump_time: f32,
    /// Natural eating completion already observed this episode.
    pub completion_handled: bool,
}

impl LocomotionState {
    /// Fresh state at spawn: airborne, not eating, idle timer armed.
    pub fn new(spawn_time: f32, first_idle_threshold: f32) -> Self {
        Self {
            move_input: Vec2::ZERO,
            running: false,
            grounded: false,
            dead: false,
            eating: false,
            previous_state: StateId::default(),
            current_state: StateId::default(),
            idle_timer: 0.0,
            next_idle_time: first_idle_threshold,
            next_jump_time: spawn_time,
            completion_handled: false,
        }
    }

    /// Magnitude of the movement input (0 or 1 for digital axes).
    #[inline]
    pub fn input_magnitude(&self) -> f32 {
        self.move_input.length()
    }

    /// Input below the idle threshold.
    #[inline]
    pub fn is_idle_input(&self, threshold: f32) -> bool {
        self.input_magnitude() < threshold
    }

    /// Current eating phase given the configured exit state.
    pub fn eating_phase(&self, exit_state: StateId) -> EatingPhase {
        match (self.eating, self.current_state == exit_state) {
            (false, _) => EatingPhase::NotEating,
            (true, true) => EatingPhase::EatingExit,
            (true, false) => EatingPhase::Eating,
        }
    }
}
