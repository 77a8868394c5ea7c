//! Game configuration.
//!
//! All tuning lives in serde structs with defaults, so a JSON file only
//! needs the values it overrides:
//!
//! ```
//! use sleigh_party::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "reindeer": { "run_speed": 7.5 } }"#).unwrap();
//! assert_eq!(config.reindeer.run_speed, 7.5);
//! assert_eq!(config.reindeer.walk_speed, 3.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::FollowCameraConfig;
use crate::lobby::LobbyConfig;
use crate::reindeer::ReindeerConfig;
use crate::santa::SantaConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON for [`GameConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A lower bound exceeds its upper bound.
    #[error("Invalid range for {field}: {min} > {max}")]
    InvalidRange {
        /// Offending setting.
        field: &'static str,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// A speed, rate or time constant is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Offending setting.
        field: &'static str,
        /// Value found.
        value: f32,
    },

    /// A count is out of bounds.
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Offending setting.
        field: &'static str,
        /// What is wrong.
        reason: String,
    },
}

/// Everything tunable, grouped by subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Reindeer controller.
    pub reindeer: ReindeerConfig,
    /// Santa controller.
    pub santa: SantaConfig,
    /// Follow camera.
    pub camera: FollowCameraConfig,
    /// Matchmaking and roles.
    pub lobby: LobbyConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

impl GameConfig {
    /// Parse and validate JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject inverted ranges and non-positive speeds or time constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.reindeer;
        positive("reindeer.walk_speed", r.walk_speed)?;
        positive("reindeer.run_speed", r.run_speed)?;
        positive("reindeer.turn_speed", r.turn_speed)?;
        positive("reindeer.velocity_blend_rate", r.velocity_blend_rate)?;
        positive("reindeer.ground_check_radius", r.ground_check_radius)?;
        positive("reindeer.speed_damp_time", r.speed_damp_time)?;
        positive("reindeer.min_idle_wait", r.min_idle_wait)?;
        ordered("reindeer.idle_wait", r.min_idle_wait, r.max_idle_wait)?;
        if r.jump_cooldown < 0.0 {
            return Err(ConfigError::NonPositive { field: "reindeer.jump_cooldown", value: r.jump_cooldown });
        }

        let s = &self.santa;
        positive("santa.walk_speed", s.walk_speed)?;
        positive("santa.run_multiplier", s.run_multiplier)?;
        positive("santa.max_stamina", s.max_stamina)?;
        ordered("santa.look", s.max_look_down, s.max_look_up)?;

        let c = &self.camera;
        positive("camera.smooth_time", c.smooth_time)?;
        positive("camera.min_distance", c.min_distance)?;
        ordered("camera.pitch", c.pitch_min, c.pitch_max)?;
        ordered("camera.distance", c.min_distance, c.max_distance)?;

        let l = &self.lobby;
        if l.max_players == 0 {
            return Err(ConfigError::Invalid {
                field: "lobby.max_players",
                reason: "room capacity must be at least 1".to_string(),
            });
        }
        if l.max_reindeer >= l.max_players {
            return Err(ConfigError::Invalid {
                field: "lobby.max_reindeer",
                reason: format!("{} reindeer leave no slot for Santa in a room of {}", l.max_reindeer, l.max_players),
            });
        }
        Ok(())
    }
}
