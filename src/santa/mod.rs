//! Santa first-person controller.
//!
//! - `config`: tuning values
//! - `stamina`: sprint pool and recovery lockout
//! - `controller`: per-frame movement and look

pub mod config;
pub mod controller;
pub mod stamina;

pub use config::SantaConfig;
pub use controller::{SantaController, SantaFrame, SantaInput};
pub use stamina::Stamina;
