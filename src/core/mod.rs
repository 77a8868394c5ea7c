//! Core primitives shared by every controller.

pub mod math;
pub mod rng;

pub use rng::{DeterministicRng, FixedUniform, UniformSource};
