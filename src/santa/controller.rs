//! Santa Controller
//!
//! First-person kinematic controller: yaw-relative walking, forward-only
//! sprinting gated by stamina, simple gravity with a grounded stick
//! velocity, and mouse look with a pitch clamp.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::math::{euler_degrees, horizontal};
use crate::host::{Animator, CharacterMotor};
use crate::santa::config::SantaConfig;
use crate::santa::stamina::Stamina;

/// Float: flat movement speed.
pub const PARAM_SPEED: &str = "Speed";
/// Bool: sprinting.
pub const PARAM_IS_RUNNING: &str = "isRunning";

/// One frame of Santa input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SantaInput {
    /// Strafe axis (-1..1).
    pub move_x: f32,
    /// Forward axis (-1..1).
    pub move_y: f32,
    /// Mouse delta X.
    pub look_x: f32,
    /// Mouse delta Y.
    pub look_y: f32,
    /// Sprint key held.
    pub run: bool,
}

/// What a frame produced, for the host's UI and camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SantaFrame {
    /// Sprinting this frame.
    pub running: bool,
    /// This frame started the stamina lockout.
    pub stamina_depleted: bool,
    /// Stamina gauge value in `[0, 1]`.
    pub stamina_fraction: f32,
    /// Body orientation (yaw only).
    pub body_rotation: Quat,
    /// Camera orientation relative to the body (pitch only).
    pub camera_local_rotation: Quat,
}

/// First-person controller state.
#[derive(Clone, Debug)]
pub struct SantaController {
    config: SantaConfig,
    stamina: Stamina,
    running: bool,
    vertical_velocity: f32,
    yaw: f32,
    pitch: f32,
}

impl SantaController {
    /// Controller with full stamina facing +Z.
    pub fn new(config: SantaConfig) -> Self {
        Self {
            stamina: Stamina::new(config.max_stamina),
            config,
            running: false,
            vertical_velocity: 0.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Stamina pool.
    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    /// Sprinting on the last frame.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Body yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Camera pitch in degrees (positive looks down).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current vertical velocity.
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Body orientation.
    pub fn body_rotation(&self) -> Quat {
        euler_degrees(0.0, self.yaw, 0.0)
    }

    /// Per-frame update: move, then look.
    pub fn update<M, A>(
        &mut self,
        now: f32,
        dt: f32,
        input: &SantaInput,
        motor: &mut M,
        animator: &mut A,
    ) -> SantaFrame
    where
        M: CharacterMotor + ?Sized,
        A: Animator + ?Sized,
    {
        self.stamina.resolve(now);
        let stamina_depleted = self.apply_movement(now, dt, input, motor, animator);
        self.apply_look(input);

        SantaFrame {
            running: self.running,
            stamina_depleted,
            stamina_fraction: self.stamina.fraction(),
            body_rotation: self.body_rotation(),
            camera_local_rotation: euler_degrees(self.pitch, 0.0, 0.0),
        }
    }

    fn apply_movement<M, A>(
        &mut self,
        now: f32,
        dt: f32,
        input: &SantaInput,
        motor: &mut M,
        animator: &mut A,
    ) -> bool
    where
        M: CharacterMotor + ?Sized,
        A: Animator + ?Sized,
    {
        let local = Vec3::new(input.move_x, 0.0, input.move_y).normalize_or_zero();
        let direction = self.body_rotation() * local;

        let wants_run = input.run && input.move_y > 0.0;
        self.running = wants_run && self.stamina.can_sprint();

        let speed = if self.running {
            self.config.walk_speed * self.config.run_multiplier
        } else {
            self.config.walk_speed
        };

        let mut depleted = false;
        if self.running {
            depleted = self.stamina.drain(now, dt, &self.config);
        } else {
            self.stamina.regenerate(dt, &self.config);
        }

        if motor.is_grounded() && self.vertical_velocity < 0.0 {
            self.vertical_velocity = self.config.grounded_stick_velocity;
        }
        self.vertical_velocity += self.config.gravity * dt;

        let velocity = direction * speed + Vec3::Y * self.vertical_velocity;
        motor.move_by(velocity * dt, dt);

        let mut flat_speed = horizontal(motor.velocity()).length();
        if flat_speed < self.config.speed_snap_epsilon {
            flat_speed = 0.0;
        }
        animator.set_float(PARAM_SPEED, flat_speed);
        animator.set_bool(PARAM_IS_RUNNING, self.running);

        depleted
    }

    fn apply_look(&mut self, input: &SantaInput) {
        let sensitivity = self.config.mouse_sensitivity;
        self.pitch = (self.pitch - input.look_y * sensitivity)
            .clamp(self.config.max_look_down, self.config.max_look_up);
        self.yaw += input.look_x * sensitivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::{ScriptedAnimator, SimMotor};
    use crate::host::StateId;

    const DT: f32 = 0.25;

    fn rig() -> (SantaController, SimMotor, ScriptedAnimator) {
        (
            SantaController::new(SantaConfig::default()),
            SimMotor::new(Vec3::ZERO, 0.0),
            ScriptedAnimator::new(StateId::default()),
        )
    }

    fn forward(run: bool) -> SantaInput {
        SantaInput { move_y: 1.0, run, ..SantaInput::default() }
    }

    #[test]
    fn test_walk_speed() {
        let (mut santa, mut motor, mut anim) = rig();
        let frame = santa.update(0.0, DT, &forward(false), &mut motor, &mut anim);
        assert!(!frame.running);
        assert!((motor.position.z - 5.0 * DT).abs() < 1e-5);
        assert!((anim.float(PARAM_SPEED).unwrap_or_default() - 5.0).abs() < 1e-4);
        assert_eq!(anim.bool(PARAM_IS_RUNNING), Some(false));
    }

    #[test]
    fn test_sprint_only_forward() {
        let (mut santa, mut motor, mut anim) = rig();
        let backwards = SantaInput { move_y: -1.0, run: true, ..SantaInput::default() };
        assert!(!santa.update(0.0, DT, &backwards, &mut motor, &mut anim).running);

        let frame = santa.update(DT, DT, &forward(true), &mut motor, &mut anim);
        assert!(frame.running);
        assert!((anim.float(PARAM_SPEED).unwrap_or_default() - 7.5).abs() < 1e-4);
        assert!(santa.stamina().current() < 100.0);
    }

    #[test]
    fn test_depletion_locks_out_sprint() {
        let (mut santa, mut motor, mut anim) = rig();
        let mut now = 0.0;
        let mut depleted_frames = 0;
        for _ in 0..20 {
            if santa.update(now, DT, &forward(true), &mut motor, &mut anim).stamina_depleted {
                depleted_frames += 1;
            }
            now += DT;
        }
        assert_eq!(depleted_frames, 1);
        assert_eq!(santa.stamina().current(), 0.0);

        // Lockout: still holding sprint, walking speed, no regeneration
        let frame = santa.update(now, DT, &forward(true), &mut motor, &mut anim);
        assert!(!frame.running);
        assert_eq!(santa.stamina().current(), 0.0);
        now += DT;

        // Lockout ends 0.5 s after depletion, then regeneration resumes
        santa.update(now, DT, &forward(false), &mut motor, &mut anim);
        assert!(!santa.stamina().is_recovering());
        assert!(santa.stamina().current() > 0.0);
    }

    #[test]
    fn test_look_clamps_pitch_and_rotates_yaw() {
        let (mut santa, mut motor, mut anim) = rig();
        let look = SantaInput { look_x: 45.0, look_y: -100.0, ..SantaInput::default() };
        santa.update(0.0, DT, &look, &mut motor, &mut anim);
        assert_eq!(santa.pitch(), 80.0);
        assert_eq!(santa.yaw(), 90.0);

        // Movement now follows the new yaw (+Z forward becomes +X)
        santa.update(DT, DT, &forward(false), &mut motor, &mut anim);
        assert!(motor.position.x > 1.0);
        assert!(motor.position.z.abs() < 1e-4);
    }

    #[test]
    fn test_grounded_stick_velocity() {
        let (mut santa, mut motor, mut anim) = rig();
        for i in 0..10 {
            santa.update(i as f32 * DT, DT, &SantaInput::default(), &mut motor, &mut anim);
        }
        // Reset to the stick value each frame, then one frame of gravity
        let expected = -2.0 + -9.81 * DT;
        assert!((santa.vertical_velocity() - expected).abs() < 1e-4);
        assert!(motor.is_grounded());
        assert_eq!(anim.float(PARAM_SPEED), Some(0.0));
    }
}
