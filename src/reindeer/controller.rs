//! Reindeer Controller
//!
//! Drives one reindeer from explicit host callbacks:
//!
//! - [`ReindeerController::frame`] once per rendered frame: ground probe,
//!   input handling (jump, eat, attack, death), idle breaks and the eating
//!   completion detector.
//! - [`ReindeerController::physics_step`] once per fixed physics step:
//!   movement, gravity shaping and animator parameter projection.
//!
//! [`ReindeerController::step`] runs both for hosts with a single loop.

use glam::Vec3;
use tracing::{debug, warn};

use crate::core::rng::{DeterministicRng, UniformSource};
use crate::host::{Animator, PhysicsWorld, RigidBody};
use crate::reindeer::animator::{
    project_parameters, SpeedParameter, PARAM_ATTACK, PARAM_DIE, PARAM_IDLE_BREAK, PARAM_JUMP,
    STATE_EATING_OUT, STATE_IDLE,
};
use crate::reindeer::config::ReindeerConfig;
use crate::reindeer::eating::{self, CompletionEdge};
use crate::reindeer::events::{CancelReason, ReindeerEvent};
use crate::reindeer::ground::update_ground;
use crate::reindeer::idle::{draw_threshold, update_idle};
use crate::reindeer::input::ReindeerInput;
use crate::reindeer::jump::try_jump;
use crate::reindeer::movement::{apply_gravity_shaping, integrate_movement, CameraBasis};
use crate::reindeer::state::{EatingPhase, LocomotionState};

/// Timing for one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Elapsed game time at this frame (seconds).
    pub now: f32,
    /// Duration of this frame (seconds).
    pub dt: f32,
}

/// Per-creature locomotion and interaction controller.
#[derive(Debug, Clone)]
pub struct ReindeerController<R = DeterministicRng> {
    config: ReindeerConfig,
    state: LocomotionState,
    speed: SpeedParameter,
    edge: CompletionEdge,
    rng: R,
    enabled: bool,
    warned_no_camera: bool,
}

impl<R: UniformSource> ReindeerController<R> {
    /// Spawn a controller at `spawn_time`. Jumps are allowed immediately.
    pub fn new(config: ReindeerConfig, mut rng: R, spawn_time: f32) -> Self {
        let first_threshold = draw_threshold(&mut rng, &config);
        Self {
            state: LocomotionState::new(spawn_time, first_threshold),
            speed: SpeedParameter::default(),
            edge: CompletionEdge { exit: STATE_EATING_OUT, idle: STATE_IDLE },
            config,
            rng,
            enabled: true,
            warned_no_camera: false,
        }
    }

    /// Override the animator states that end an eating episode.
    pub fn with_completion_edge(mut self, edge: CompletionEdge) -> Self {
        self.edge = edge;
        self
    }

    /// Current state.
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReindeerConfig {
        &self.config
    }

    /// Last projected `Speed` parameter.
    pub fn animator_speed(&self) -> f32 {
        self.speed.value()
    }

    /// False once the creature died.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Eating phase as seen through the last reported animator state.
    pub fn eating_phase(&self) -> EatingPhase {
        self.state.eating_phase(self.edge.exit)
    }

    /// Per-frame update.
    pub fn frame<W, B, A>(
        &mut self,
        ctx: FrameContext,
        input: &ReindeerInput,
        world: &W,
        body: &mut B,
        animator: &mut A,
    ) -> Vec<ReindeerEvent>
    where
        W: PhysicsWorld + ?Sized,
        B: RigidBody + ?Sized,
        A: Animator + ?Sized,
    {
        let mut events = Vec::new();
        if !self.enabled {
            return events;
        }

        events.extend(update_ground(&mut self.state, world, body.position(), &self.config));

        self.handle_input(ctx.now, input, body, animator, &mut events);
        if self.state.dead {
            return events;
        }

        if let Some(next_threshold) = update_idle(&mut self.state, ctx.dt, &self.config, &mut self.rng) {
            animator.set_trigger(PARAM_IDLE_BREAK);
            events.push(ReindeerEvent::IdleBreak { next_threshold });
        }

        eating::observe_state(&mut self.state, animator.current_state());
        events.extend(eating::check_completion(&mut self.state, animator, self.edge));

        events
    }

    /// Fixed physics step. `basis` is the camera orientation; without one,
    /// movement falls back to world axes.
    pub fn physics_step<W, B, A>(
        &mut self,
        dt: f32,
        basis: Option<CameraBasis>,
        world: &W,
        body: &mut B,
        animator: &mut A,
    ) where
        W: PhysicsWorld + ?Sized,
        B: RigidBody + ?Sized,
        A: Animator + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let basis = basis.unwrap_or_else(|| {
            if !self.warned_no_camera {
                warn!("reindeer has no camera basis; moving along world axes");
                self.warned_no_camera = true;
            }
            CameraBasis::WORLD
        });

        integrate_movement(&self.state, body, basis, dt, &self.config);
        apply_gravity_shaping(body, world.gravity(), &self.config);
        project_parameters(animator, &mut self.speed, &self.state, &self.config, dt);
    }

    /// Frame update followed by an optional physics step of `physics_dt`.
    #[allow(clippy::too_many_arguments)]
    pub fn step<W, B, A>(
        &mut self,
        ctx: FrameContext,
        physics_dt: Option<f32>,
        input: &ReindeerInput,
        basis: Option<CameraBasis>,
        world: &W,
        body: &mut B,
        animator: &mut A,
    ) -> Vec<ReindeerEvent>
    where
        W: PhysicsWorld + ?Sized,
        B: RigidBody + ?Sized,
        A: Animator + ?Sized,
    {
        let events = self.frame(ctx, input, world, body, animator);
        if let Some(dt) = physics_dt {
            self.physics_step(dt, basis, world, body, animator);
        }
        events
    }

    /// Kill the creature from outside (e.g. caught by Santa).
    pub fn kill<A: Animator + ?Sized>(&mut self, animator: &mut A) -> Vec<ReindeerEvent> {
        let mut events = Vec::new();
        if self.state.dead {
            return events;
        }
        self.die(animator, &mut events);
        events
    }

    fn handle_input<B, A>(
        &mut self,
        now: f32,
        input: &ReindeerInput,
        body: &mut B,
        animator: &mut A,
        events: &mut Vec<ReindeerEvent>,
    ) where
        B: RigidBody + ?Sized,
        A: Animator + ?Sized,
    {
        self.state.move_input = input.move_direction();
        self.state.running = input.run_held();

        if self.state.dead {
            return;
        }

        // Decisions below see the eating flag as it was when the frame began
        let was_eating = self.state.eating;

        if input.jump_pressed() && try_jump(&mut self.state, now, self.config.jump_cooldown) {
            if was_eating {
                events.extend(eating::cancel_eating(&mut self.state, animator, CancelReason::Jump));
            }

            let v = body.velocity();
            body.set_velocity(Vec3::new(v.x, 0.0, v.z));
            body.add_impulse(Vec3::Y * self.config.jump_force);
            animator.set_trigger(PARAM_JUMP);
            debug!(next_jump_time = self.state.next_jump_time, "jump accepted");
            events.push(ReindeerEvent::Jumped { next_jump_time: self.state.next_jump_time });
        }

        if input.eat_pressed() && !was_eating {
            events.extend(eating::start_eating(&mut self.state, animator, self.config.input_threshold));
        }

        if was_eating && self.state.input_magnitude() > self.config.input_threshold {
            events.extend(eating::cancel_eating(&mut self.state, animator, CancelReason::Movement));
        }

        if input.attack_pressed() {
            animator.set_trigger(PARAM_ATTACK);
            events.push(ReindeerEvent::Attacked);
        }

        if input.die_pressed() {
            self.die(animator, events);
        }
    }

    fn die<A: Animator + ?Sized>(&mut self, animator: &mut A, events: &mut Vec<ReindeerEvent>) {
        events.extend(eating::cancel_eating(&mut self.state, animator, CancelReason::Death));
        animator.set_trigger(PARAM_DIE);
        self.state.dead = true;
        self.enabled = false;
        debug!("reindeer died");
        events.push(ReindeerEvent::Died);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::FixedUniform;
    use crate::host::sim::{ScriptedAnimator, SimBody, SimWorld};
    use crate::host::LayerMask;
    use crate::reindeer::animator::{
        PARAM_EAT_TRIGGER, PARAM_IS_EATING, PARAM_SPEED, STATE_EATING_LOOP,
    };

    const DT: f32 = 0.02;
    /// Longest idle threshold the default config allows.
    const LONG_IDLE: f32 = 10.0;

    struct Rig {
        controller: ReindeerController<FixedUniform>,
        world: SimWorld,
        body: SimBody,
        anim: ScriptedAnimator,
        now: f32,
    }

    impl Rig {
        fn new(idle_threshold: f32) -> Self {
            Self {
                controller: ReindeerController::new(
                    ReindeerConfig::default(),
                    FixedUniform(idle_threshold),
                    0.0,
                ),
                world: SimWorld::with_floor(LayerMask::DEFAULT),
                body: SimBody::new(Vec3::ZERO),
                anim: ScriptedAnimator::new(STATE_IDLE),
                now: 0.0,
            }
        }

        fn frame(&mut self, input: ReindeerInput) -> Vec<ReindeerEvent> {
            let ctx = FrameContext { now: self.now, dt: DT };
            let events = self.controller.frame(ctx, &input, &self.world, &mut self.body, &mut self.anim);
            self.now += DT;
            events
        }

        fn tick(&mut self, input: ReindeerInput) -> Vec<ReindeerEvent> {
            let events = self.frame(input);
            self.controller.physics_step(
                DT,
                Some(CameraBasis::WORLD),
                &self.world,
                &mut self.body,
                &mut self.anim,
            );
            self.world.integrate(&mut self.body, DT);
            events
        }
    }

    fn eat() -> ReindeerInput {
        ReindeerInput::new().with_flags(ReindeerInput::FLAG_EAT)
    }

    fn jump() -> ReindeerInput {
        ReindeerInput::new().with_flags(ReindeerInput::FLAG_JUMP)
    }

    #[test]
    fn test_first_frame_lands() {
        let mut rig = Rig::new(6.0);
        let events = rig.frame(ReindeerInput::new());
        assert_eq!(events, vec![ReindeerEvent::Landed]);
        assert!(rig.controller.state().grounded);
    }

    #[test]
    fn test_jump_applies_impulse_and_cooldown() {
        let mut rig = Rig::new(6.0);
        rig.body.velocity = Vec3::new(1.0, -0.5, 2.0);

        let events = rig.frame(jump());
        assert!(events.contains(&ReindeerEvent::Jumped { next_jump_time: 1.0 }));
        assert_eq!(rig.body.velocity, Vec3::new(1.0, 8.0, 2.0));
        assert!(rig.anim.fired(PARAM_JUMP));
    }

    #[test]
    fn test_jump_rejected_during_cooldown() {
        let mut rig = Rig::new(6.0);
        rig.frame(jump());
        rig.body.velocity = Vec3::ZERO;
        rig.anim.take_triggers();

        // Still grounded (body never integrated), but cooldown active
        let events = rig.frame(jump());
        assert!(!events.iter().any(|e| matches!(e, ReindeerEvent::Jumped { .. })));
        assert_eq!(rig.body.velocity, Vec3::ZERO);
        assert!(!rig.anim.fired(PARAM_JUMP));
    }

    #[test]
    fn test_jump_cancels_eating() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        let events = rig.frame(eat());
        assert!(events.contains(&ReindeerEvent::EatingStarted));
        assert!(rig.controller.state().eating);

        let events = rig.frame(jump());
        assert_eq!(
            events,
            vec![
                ReindeerEvent::EatingCancelled { reason: CancelReason::Jump },
                ReindeerEvent::Jumped { next_jump_time: rig.controller.state().next_jump_time },
            ]
        );
        let state = rig.controller.state();
        assert!(!state.eating);
        assert!(!state.completion_handled);
        assert_eq!(rig.body.velocity.y, 8.0);
        assert!(rig.anim.fired(PARAM_JUMP));
        assert_eq!(rig.anim.bool(PARAM_IS_EATING), Some(false));
    }

    #[test]
    fn test_eat_and_jump_same_frame_does_not_restart() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());
        rig.anim.take_triggers();

        let both = ReindeerInput::new().with_flags(ReindeerInput::FLAG_EAT | ReindeerInput::FLAG_JUMP);
        rig.frame(both);
        assert!(!rig.controller.state().eating);
        assert!(!rig.anim.fired(PARAM_EAT_TRIGGER));
    }

    #[test]
    fn test_movement_cancels_eating() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());

        let events = rig.frame(ReindeerInput::with_movement(0.0, 1.0));
        assert_eq!(events, vec![ReindeerEvent::EatingCancelled { reason: CancelReason::Movement }]);
        assert!(!rig.controller.state().eating);
    }

    #[test]
    fn test_eat_rejected_while_moving() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        let input = ReindeerInput::with_movement(1.0, 0.0).with_flags(ReindeerInput::FLAG_EAT);
        let events = rig.frame(input);
        assert!(events.is_empty());
        assert!(!rig.controller.state().eating);
    }

    #[test]
    fn test_natural_completion_sequence() {
        let mut rig = Rig::new(LONG_IDLE);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());

        rig.anim.set_state(STATE_EATING_LOOP);
        assert!(rig.frame(ReindeerInput::new()).is_empty());
        assert_eq!(rig.controller.eating_phase(), EatingPhase::Eating);

        rig.anim.set_state(STATE_EATING_OUT);
        assert!(rig.frame(ReindeerInput::new()).is_empty());
        assert_eq!(rig.controller.eating_phase(), EatingPhase::EatingExit);
        assert!(rig.frame(ReindeerInput::new()).is_empty());

        rig.anim.set_state(STATE_IDLE);
        assert_eq!(rig.frame(ReindeerInput::new()), vec![ReindeerEvent::EatingCompleted]);
        assert!(!rig.controller.state().eating);
        assert!(rig.controller.state().completion_handled);

        for _ in 0..50 {
            assert!(rig.frame(ReindeerInput::new()).is_empty());
        }
    }

    #[test]
    fn test_idle_break_after_threshold() {
        let mut rig = Rig::new(6.0);
        let mut breaks = 0;
        // 6 s at 50 Hz, plus slack for float accumulation
        for _ in 0..305 {
            for event in rig.frame(ReindeerInput::new()) {
                if let ReindeerEvent::IdleBreak { next_threshold } = event {
                    assert_eq!(next_threshold, 6.0);
                    breaks += 1;
                }
            }
        }
        assert_eq!(breaks, 1);
        assert!(rig.anim.fired(PARAM_IDLE_BREAK));
    }

    #[test]
    fn test_no_idle_break_while_eating() {
        let mut rig = Rig::new(1.0);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());
        rig.anim.set_state(STATE_EATING_LOOP);
        for _ in 0..500 {
            rig.frame(ReindeerInput::new());
        }
        assert!(!rig.anim.fired(PARAM_IDLE_BREAK));
        assert_eq!(rig.controller.state().idle_timer, 0.0);
    }

    #[test]
    fn test_death_cancels_eating_and_disables() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());

        let events = rig.frame(ReindeerInput::new().with_flags(ReindeerInput::FLAG_DIE));
        assert_eq!(
            events,
            vec![
                ReindeerEvent::EatingCancelled { reason: CancelReason::Death },
                ReindeerEvent::Died,
            ]
        );
        assert!(!rig.controller.is_enabled());
        assert!(rig.anim.fired(PARAM_DIE));

        rig.anim.take_triggers();
        assert!(rig.tick(jump()).is_empty());
        assert!(rig.anim.triggers.is_empty());
        assert!(rig.controller.kill(&mut rig.anim).is_empty());
    }

    #[test]
    fn test_kill_cancels_eating() {
        let mut rig = Rig::new(6.0);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());
        assert!(rig.controller.state().eating);

        let events = rig.controller.kill(&mut rig.anim);
        assert_eq!(
            events,
            vec![
                ReindeerEvent::EatingCancelled { reason: CancelReason::Death },
                ReindeerEvent::Died,
            ]
        );
        assert_eq!(rig.anim.bool(PARAM_IS_EATING), Some(false));
        assert!(rig.anim.fired(PARAM_DIE));
        assert!(!rig.controller.state().eating);
        assert!(!rig.controller.is_enabled());
    }

    #[test]
    fn test_custom_completion_edge() {
        let mut rig = Rig::new(LONG_IDLE);
        let edge = CompletionEdge { exit: STATE_EATING_LOOP, idle: STATE_IDLE };
        rig.controller = rig.controller.clone().with_completion_edge(edge);
        rig.frame(ReindeerInput::new());
        rig.frame(eat());

        rig.anim.set_state(STATE_EATING_LOOP);
        rig.frame(ReindeerInput::new());
        assert_eq!(rig.controller.eating_phase(), EatingPhase::EatingExit);

        rig.anim.set_state(STATE_IDLE);
        assert_eq!(rig.frame(ReindeerInput::new()), vec![ReindeerEvent::EatingCompleted]);
    }

    #[test]
    fn test_walking_projects_speed() {
        let mut rig = Rig::new(LONG_IDLE);
        for _ in 0..100 {
            rig.tick(ReindeerInput::with_movement(0.0, 1.0));
        }
        assert!(rig.body.velocity.z > 2.9);
        assert!((rig.anim.float(PARAM_SPEED).unwrap_or_default() - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_full_jump_arc_returns_to_ground() {
        let mut rig = Rig::new(LONG_IDLE);
        rig.tick(ReindeerInput::new());
        rig.tick(jump());

        let mut left = false;
        let mut landed = false;
        for _ in 0..200 {
            for event in rig.tick(ReindeerInput::new()) {
                match event {
                    ReindeerEvent::LeftGround => left = true,
                    ReindeerEvent::Landed => landed = true,
                    _ => {}
                }
            }
        }
        assert!(left && landed);
        assert!(rig.controller.state().grounded);
    }

    #[test]
    fn test_missing_camera_falls_back_to_world_axes() {
        let mut rig = Rig::new(LONG_IDLE);
        let input = ReindeerInput::with_movement(1.0, 0.0);
        for _ in 0..100 {
            let ctx = FrameContext { now: rig.now, dt: DT };
            rig.controller.step(ctx, Some(DT), &input, None, &rig.world, &mut rig.body, &mut rig.anim);
            rig.now += DT;
        }
        assert!(rig.body.velocity.x > 2.9);
    }
}
