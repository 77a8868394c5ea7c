//! Lobby: Matchmaking & Role Selection
//!
//! The client side of the pre-game flow. A [`session::SessionService`]
//! stands in for the networking service; [`matchmaking::Matchmaker`]
//! walks connect → lobby → room, and [`roles::RoleSelector`] lets each
//! player in the room claim Santa or Reindeer.
//!
//! ```text
//!  SessionService ── poll() ──▶ SessionCallback ──┬──▶ Matchmaker   ──▶ scene request
//!        ▲                                        └──▶ RoleSelector ──▶ status / list text
//!        └──────────── requests (join, create, set properties) ◀──┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod local;
pub mod matchmaking;
pub mod roles;
pub mod session;

pub use local::{LocalCloud, LocalSession};
pub use matchmaking::{Matchmaker, MatchmakingPhase};
pub use roles::{RoleError, RoleSelector};
pub use session::{RoomSnapshot, SessionCallback, SessionError, SessionService};

/// Unique room identifier.
pub type RoomId = [u8; 16];

/// Unique player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub uuid::Uuid);

impl PlayerId {
    /// Fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playable role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// First-person hunter, at most one per room.
    Santa,
    /// Third-person creature, limited per room.
    Reindeer,
}

impl Role {
    /// Display name, also the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Santa => "Santa",
            Role::Reindeer => "Reindeer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom per-player properties replicated to the whole room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProps {
    /// Claimed role, if any.
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// A player as seen by everyone in the room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Identifier.
    pub id: PlayerId,
    /// Display name.
    pub nickname: String,
    /// Replicated properties.
    pub props: PlayerProps,
}

/// Options used when creating a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOptions {
    /// Capacity.
    pub max_players: usize,
}

/// Lobby tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    /// Capacity of rooms this client creates.
    pub max_players: usize,
    /// Reindeer slots per room.
    pub max_reindeer: usize,
    /// Scene requested once a room is joined.
    pub room_scene: String,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_players: 5,
            max_reindeer: 4,
            room_scene: "RoomScene".to_string(),
        }
    }
}
