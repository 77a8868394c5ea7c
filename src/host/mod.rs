//! Host Collaborators
//!
//! Everything the controllers need from the surrounding engine, expressed
//! as traits: world queries, rigid and kinematic bodies, and the animation
//! state player. Controllers never own engine objects; the host loop hands
//! them `&mut` access for the duration of one tick.
//!
//! `sim` provides small in-memory implementations used by the demo binary
//! and the test suites.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub mod sim;

// =============================================================================
// LAYERS
// =============================================================================

/// Bit set of collision layers a query should consider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: Self = Self(0);
    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Layer 0, conventionally static level geometry.
    pub const DEFAULT: Self = Self(1);

    /// Mask containing a single layer (0..=31).
    pub const fn layer(index: u8) -> Self {
        Self(1 << (index as u32 & 31))
    }

    /// Whether any layer of `other` is in this mask.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Union of two masks.
    #[inline]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

// =============================================================================
// WORLD / BODIES
// =============================================================================

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray from its origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// Read-only queries against the physics scene.
pub trait PhysicsWorld {
    /// Whether a sphere overlaps any collider on `mask`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Nearest hit along a ray, limited to `max_distance`. `direction` is
    /// expected to be normalized.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// Global gravity acceleration.
    fn gravity(&self) -> Vec3;
}

/// A dynamic body integrated by the host physics step.
pub trait RigidBody {
    /// Pivot position.
    fn position(&self) -> Vec3;
    /// Linear velocity.
    fn velocity(&self) -> Vec3;
    /// Overwrite linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);
    /// Facing.
    fn rotation(&self) -> Quat;
    /// Overwrite facing.
    fn set_rotation(&mut self, rotation: Quat);
    /// Instantaneous change of momentum (mass aware).
    fn add_impulse(&mut self, impulse: Vec3);
    /// Acceleration applied during the next integration (mass independent).
    fn add_acceleration(&mut self, acceleration: Vec3);
}

/// A kinematic capsule moved by explicit displacements.
pub trait CharacterMotor {
    /// Move by `delta`, resolving collisions. `dt` is the frame duration the
    /// displacement covers and is used to derive the resulting velocity.
    fn move_by(&mut self, delta: Vec3, dt: f32);
    /// Whether the last move ended touching the ground.
    fn is_grounded(&self) -> bool;
    /// Velocity actually achieved by the last move.
    fn velocity(&self) -> Vec3;
}

// =============================================================================
// ANIMATION
// =============================================================================

/// Identifier of an animation state, derived from its short name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct StateId(pub u32);

impl StateId {
    /// Hash a state name (FNV-1a, 32 bit).
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash: u32 = 0x811c_9dc5;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(0x0100_0193);
            i += 1;
        }
        Self(hash)
    }
}

/// The animation-state player attached to a character.
///
/// Parameter writes are fire-and-forget. The only thing read back is the
/// identifier of the currently active state.
pub trait Animator {
    /// Fire a one-shot trigger parameter.
    fn set_trigger(&mut self, name: &str);
    /// Write a boolean parameter.
    fn set_bool(&mut self, name: &str, value: bool);
    /// Write a float parameter.
    fn set_float(&mut self, name: &str, value: f32);
    /// Currently active state on the base layer.
    fn current_state(&self) -> StateId;
}
