//! Sprint stamina with a deferred recovery lockout.
//!
//! Running dry starts a fixed lockout. The lockout is a one-shot deferred
//! transition: it always runs to completion, even if the player stops
//! sprinting or would otherwise be able to recover sooner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::santa::config::SantaConfig;

/// Stamina pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stamina {
    current: f32,
    max: f32,
    /// Lockout end time while recovering.
    recover_at: Option<f32>,
}

impl Stamina {
    /// Full pool.
    pub fn new(max: f32) -> Self {
        Self { current: max, max, recover_at: None }
    }

    /// Remaining stamina.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Pool size.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Remaining stamina as a fraction of the pool (gauge value).
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    /// Inside the post-depletion lockout.
    pub fn is_recovering(&self) -> bool {
        self.recover_at.is_some()
    }

    /// Sprinting allowed right now.
    pub fn can_sprint(&self) -> bool {
        self.current > 0.0 && !self.is_recovering()
    }

    /// Fire the deferred end of the lockout once `now` has reached it.
    pub fn resolve(&mut self, now: f32) {
        if let Some(at) = self.recover_at {
            if now >= at {
                self.recover_at = None;
                debug!("stamina lockout ended");
            }
        }
    }

    /// Drain for one frame of sprinting. Returns `true` when this drain
    /// started the lockout.
    pub fn drain(&mut self, now: f32, dt: f32, config: &SantaConfig) -> bool {
        self.current = (self.current - config.stamina_decrease_rate * dt).clamp(0.0, self.max);
        if self.current <= 0.0 && !self.is_recovering() {
            self.recover_at = Some(now + config.stamina_recovery_delay);
            debug!(until = now + config.stamina_recovery_delay, "stamina depleted");
            return true;
        }
        false
    }

    /// Regenerate for one frame of not sprinting (no-op during the lockout).
    pub fn regenerate(&mut self, dt: f32, config: &SantaConfig) {
        if self.is_recovering() {
            return;
        }
        self.current = (self.current + config.stamina_recover_rate * dt).clamp(0.0, self.max);
    }
}
