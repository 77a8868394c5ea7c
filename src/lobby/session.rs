//! Session service seam.
//!
//! Requests return immediately. Their outcome arrives later as a
//! [`SessionCallback`] drained with [`SessionService::poll`], the same
//! way a hosted realtime service reports back to its client.

use thiserror::Error;

use super::{PlayerId, PlayerInfo, PlayerProps, RoomId, RoomOptions};

/// Room state visible to a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Room identifier.
    pub id: RoomId,
    /// Capacity.
    pub max_players: usize,
    /// Members in join order.
    pub players: Vec<PlayerInfo>,
}

impl RoomSnapshot {
    /// Current member count.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Member by id.
    pub fn player(&self, id: PlayerId) -> Option<&PlayerInfo> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Notification delivered to a client.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCallback {
    /// Connection to the master server completed.
    ConnectedToMaster,
    /// Entered the default lobby.
    JoinedLobby,
    /// No open room had space.
    JoinRandomFailed {
        /// Why the join failed.
        reason: SessionError,
    },
    /// This client created a room (followed by `JoinedRoom`).
    CreatedRoom {
        /// New room.
        room: RoomId,
    },
    /// This client entered a room.
    JoinedRoom {
        /// Joined room.
        room: RoomId,
    },
    /// Another player entered the current room.
    PlayerEntered(PlayerInfo),
    /// Another player left the current room.
    PlayerLeft(PlayerInfo),
    /// A member (possibly this client) changed its properties.
    PlayerPropertiesUpdated {
        /// Whose properties changed.
        player: PlayerId,
        /// New properties.
        props: PlayerProps,
    },
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Request needs a master connection.
    #[error("Not connected")]
    NotConnected,

    /// Target room is at capacity.
    #[error("Room is full")]
    RoomFull,

    /// No room with free space exists.
    #[error("No room available")]
    NoRoomAvailable,

    /// Client is already in a room.
    #[error("Already in room")]
    AlreadyInRoom,

    /// Request needs room membership.
    #[error("Not in room")]
    NotInRoom,

    /// The client handle is unknown to the service.
    #[error("Player not found")]
    PlayerNotFound,
}

/// Client-side view of the realtime session service.
#[allow(async_fn_in_trait)]
pub trait SessionService {
    /// The local player's id.
    fn local_player(&self) -> PlayerId;

    /// Connect to the master server.
    async fn connect(&self) -> Result<(), SessionError>;

    /// Connected and able to issue room requests.
    async fn is_connected_and_ready(&self) -> bool;

    /// Enter the default lobby.
    async fn join_lobby(&self) -> Result<(), SessionError>;

    /// Join any open room with space, or report `JoinRandomFailed`.
    async fn join_random_room(&self) -> Result<(), SessionError>;

    /// Join a specific room.
    async fn join_room(&self, room: RoomId) -> Result<(), SessionError>;

    /// Create a room and join it.
    async fn create_room(&self, options: RoomOptions) -> Result<RoomId, SessionError>;

    /// Leave the current room.
    async fn leave_room(&self) -> Result<(), SessionError>;

    /// Replace the local player's replicated properties.
    async fn set_local_properties(&self, props: PlayerProps) -> Result<(), SessionError>;

    /// Current room, if any.
    async fn room(&self) -> Option<RoomSnapshot>;

    /// Drain pending callbacks in delivery order.
    async fn poll(&self) -> Vec<SessionCallback>;
}
