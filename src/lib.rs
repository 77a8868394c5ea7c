//! # Sleigh Party
//!
//! Tick-driven gameplay core for a small multiplayer party game: one
//! player is Santa, the others are reindeer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SLEIGH PARTY                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Math and randomness                       │
//! │  ├── math.rs     - Lerp, smoothing, orientation helpers      │
//! │  └── rng.rs      - Seeded Xorshift128+ and uniform sources   │
//! │                                                              │
//! │  host/           - Engine seams (traits)                     │
//! │  └── sim.rs      - In-memory world, bodies, animator         │
//! │                                                              │
//! │  reindeer/       - Third-person creature controller          │
//! │  ├── ground.rs   - Ground probe and edges                    │
//! │  ├── movement.rs - Camera-relative movement, gravity         │
//! │  ├── eating.rs   - Eating interaction and completion         │
//! │  ├── idle.rs     - Idle-break timer                          │
//! │  └── controller.rs - Frame and physics entry points          │
//! │                                                              │
//! │  santa/          - First-person controller with stamina      │
//! │  camera/         - Orbiting follow camera                    │
//! │  lobby/          - Matchmaking and role selection            │
//! │  config.rs       - JSON configuration                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Host Contract
//!
//! Controllers never own engine objects. Each tick the host passes the
//! elapsed time, an input snapshot and `&mut` access to the body and the
//! animator through the [`host`] traits. Everything observable comes
//! back as returned events or animator parameter writes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod core;
pub mod host;
pub mod lobby;
pub mod reindeer;
pub mod santa;

// Re-export commonly used types
pub use camera::{CameraInput, FollowCamera, FollowCameraConfig};
pub use config::{ConfigError, GameConfig};
pub use core::rng::{DeterministicRng, UniformSource};
pub use lobby::{LobbyConfig, Role};
pub use reindeer::{FrameContext, ReindeerController, ReindeerEvent, ReindeerInput};
pub use santa::{SantaController, SantaInput};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Duration of one tick (seconds)
pub const FRAME_DT: f32 = 1.0 / TICK_RATE as f32;
