//! In-memory host implementations.
//!
//! A tiny world made of half-space planes, an explicit-Euler rigid body, a
//! kinematic motor and an animator that records writes and replays a queue
//! of reported states. Good enough to drive the controllers end-to-end
//! without an engine.

use std::collections::{BTreeMap, VecDeque};

use glam::{Quat, Vec3};

use super::{Animator, CharacterMotor, LayerMask, PhysicsWorld, RayHit, RigidBody, StateId};

/// Standard gravity used by the simulated world.
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

// =============================================================================
// WORLD
// =============================================================================

/// Solid half-space: everything behind `normal · p = offset` is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimPlane {
    /// Outward unit normal.
    pub normal: Vec3,
    /// Plane offset along `normal`.
    pub offset: f32,
    /// Layer this collider lives on.
    pub layer: LayerMask,
}

impl SimPlane {
    /// Horizontal floor at `height`.
    pub fn floor(height: f32, layer: LayerMask) -> Self {
        Self { normal: Vec3::Y, offset: height, layer }
    }

    /// Plane through `point` facing `normal`.
    pub fn wall(point: Vec3, normal: Vec3, layer: LayerMask) -> Self {
        let normal = normal.normalize_or_zero();
        Self { normal, offset: normal.dot(point), layer }
    }

    /// Signed distance of `point` in front of the plane.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

/// A world of planes with a constant gravity.
#[derive(Clone, Debug)]
pub struct SimWorld {
    /// Colliders.
    pub planes: Vec<SimPlane>,
    /// Gravity acceleration.
    pub gravity: Vec3,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self { planes: Vec::new(), gravity: DEFAULT_GRAVITY }
    }
}

impl SimWorld {
    /// World with a single floor at y = 0 on `ground` layer.
    pub fn with_floor(ground: LayerMask) -> Self {
        Self {
            planes: vec![SimPlane::floor(0.0, ground)],
            ..Self::default()
        }
    }

    /// Add a collider.
    pub fn add_plane(&mut self, plane: SimPlane) -> &mut Self {
        self.planes.push(plane);
        self
    }

    /// Advance a body by `dt`: apply gravity and queued acceleration,
    /// integrate, then push it out of any plane it sank into.
    pub fn integrate(&self, body: &mut SimBody, dt: f32) {
        body.velocity += (self.gravity + body.pending_acceleration) * dt;
        body.pending_acceleration = Vec3::ZERO;
        body.position += body.velocity * dt;

        for plane in &self.planes {
            let depth = plane.distance(body.position);
            if depth < 0.0 {
                body.position -= plane.normal * depth;
                let into = body.velocity.dot(plane.normal);
                if into < 0.0 {
                    body.velocity -= plane.normal * into;
                }
            }
        }
    }
}

impl PhysicsWorld for SimWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.planes
            .iter()
            .filter(|p| p.layer.intersects(mask))
            .any(|p| p.distance(center) <= radius)
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for plane in self.planes.iter().filter(|p| p.layer.intersects(mask)) {
            let denom = plane.normal.dot(direction);
            // Only front faces block
            if denom >= 0.0 {
                continue;
            }
            let t = -plane.distance(origin) / denom;
            if t < 0.0 || t > max_distance {
                continue;
            }
            if nearest.map_or(true, |hit| t < hit.distance) {
                nearest = Some(RayHit {
                    distance: t,
                    point: origin + direction * t,
                    normal: plane.normal,
                });
            }
        }
        nearest
    }

    fn gravity(&self) -> Vec3 {
        self.gravity
    }
}

// =============================================================================
// BODIES
// =============================================================================

/// Simulated rigid body. Gravity and collision come from [`SimWorld::integrate`].
#[derive(Clone, Debug)]
pub struct SimBody {
    /// Pivot position.
    pub position: Vec3,
    /// Linear velocity.
    pub velocity: Vec3,
    /// Facing.
    pub rotation: Quat,
    /// Mass in kilograms.
    pub mass: f32,
    pending_acceleration: Vec3,
}

impl SimBody {
    /// Unit-mass body at rest.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mass: 1.0,
            pending_acceleration: Vec3::ZERO,
        }
    }

    /// Acceleration queued for the next integration.
    pub fn pending_acceleration(&self) -> Vec3 {
        self.pending_acceleration
    }
}

impl RigidBody for SimBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    fn add_acceleration(&mut self, acceleration: Vec3) {
        self.pending_acceleration += acceleration;
    }
}

/// Kinematic motor over a flat floor.
#[derive(Clone, Debug)]
pub struct SimMotor {
    /// Feet position.
    pub position: Vec3,
    /// Floor height.
    pub floor: f32,
    grounded: bool,
    velocity: Vec3,
}

impl SimMotor {
    /// Motor standing at `position` above a floor at `floor`.
    pub fn new(position: Vec3, floor: f32) -> Self {
        Self {
            position,
            floor,
            grounded: position.y <= floor,
            velocity: Vec3::ZERO,
        }
    }
}

impl CharacterMotor for SimMotor {
    fn move_by(&mut self, delta: Vec3, dt: f32) {
        let start = self.position;
        let mut target = start + delta;
        self.grounded = false;
        if target.y <= self.floor {
            target.y = self.floor;
            self.grounded = true;
        }
        self.position = target;
        self.velocity = if dt > 0.0 { (target - start) / dt } else { Vec3::ZERO };
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

// =============================================================================
// ANIMATOR
// =============================================================================

/// Animator that records every write and reports scripted states.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAnimator {
    /// Triggers fired since the last [`ScriptedAnimator::take_triggers`].
    pub triggers: Vec<String>,
    /// Last written booleans.
    pub bools: BTreeMap<String, bool>,
    /// Last written floats.
    pub floats: BTreeMap<String, f32>,
    current: StateId,
    script: VecDeque<StateId>,
}

impl ScriptedAnimator {
    /// Animator starting in `state`.
    pub fn new(state: StateId) -> Self {
        Self { current: state, ..Self::default() }
    }

    /// Force the reported state.
    pub fn set_state(&mut self, state: StateId) {
        self.current = state;
    }

    /// Queue states to report, one per [`ScriptedAnimator::advance`].
    pub fn queue_states<I: IntoIterator<Item = StateId>>(&mut self, states: I) {
        self.script.extend(states);
    }

    /// Whether scripted states remain.
    pub fn has_script(&self) -> bool {
        !self.script.is_empty()
    }

    /// Move to the next scripted state, if any.
    pub fn advance(&mut self) {
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
    }

    /// Drain recorded triggers.
    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }

    /// Whether `name` was fired since the last drain.
    pub fn fired(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| t == name)
    }

    /// Last written boolean, if any.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Last written float, if any.
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }
}

impl Animator for ScriptedAnimator {
    fn set_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn current_state(&self) -> StateId {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: LayerMask = LayerMask::layer(3);

    #[test]
    fn test_overlap_respects_mask() {
        let world = SimWorld::with_floor(GROUND);
        let probe = Vec3::new(0.0, 0.05, 0.0);
        assert!(world.overlap_sphere(probe, 0.1, GROUND));
        assert!(!world.overlap_sphere(probe, 0.1, LayerMask::layer(5)));
        assert!(!world.overlap_sphere(Vec3::new(0.0, 1.0, 0.0), 0.1, GROUND));
    }

    #[test]
    fn test_raycast_hits_wall_front_face() {
        let mut world = SimWorld::default();
        world.add_plane(SimPlane::wall(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, GROUND));

        let hit = world
            .raycast(Vec3::ZERO, -Vec3::Z, 10.0, GROUND)
            .expect("wall should block");
        assert!((hit.distance - 2.0).abs() < 1e-5);

        // Beyond range / facing away
        assert!(world.raycast(Vec3::ZERO, -Vec3::Z, 1.5, GROUND).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::Z, 10.0, GROUND).is_none());
    }

    #[test]
    fn test_integrate_rests_on_floor() {
        let world = SimWorld::with_floor(GROUND);
        let mut body = SimBody::new(Vec3::new(0.0, 1.0, 0.0));
        for _ in 0..120 {
            world.integrate(&mut body, 1.0 / 60.0);
        }
        assert!(body.position.y.abs() < 1e-4);
        assert!(body.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_impulse_scales_by_mass() {
        let mut body = SimBody::new(Vec3::ZERO);
        body.mass = 2.0;
        body.add_impulse(Vec3::new(0.0, 8.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_motor_clamps_to_floor() {
        let mut motor = SimMotor::new(Vec3::ZERO, 0.0);
        motor.move_by(Vec3::new(1.0, -0.5, 0.0), 0.5);
        assert!(motor.is_grounded());
        assert_eq!(motor.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(motor.velocity(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_animator_script_advances() {
        let idle = StateId::from_name("Idle");
        let out = StateId::from_name("Eating_Out");
        let mut anim = ScriptedAnimator::new(idle);
        anim.queue_states([out, idle]);

        anim.advance();
        assert_eq!(anim.current_state(), out);
        anim.advance();
        assert_eq!(anim.current_state(), idle);
        anim.advance();
        assert_eq!(anim.current_state(), idle);
        assert!(!anim.has_script());
    }
}
