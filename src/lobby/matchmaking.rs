//! Matchmaking flow.
//!
//! connect → join lobby → join a random room, creating one when none has
//! space. Once inside, the player list is kept current and the room scene
//! is requested.

use tracing::{info, warn};

use super::session::{SessionCallback, SessionError, SessionService};
use super::{LobbyConfig, RoomOptions};

/// Where the client is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchmakingPhase {
    /// Not started.
    Idle,
    /// Waiting for the master connection.
    Connecting,
    /// Waiting to enter the lobby.
    JoiningLobby,
    /// Waiting for a room.
    JoiningRoom,
    /// Inside a room.
    InRoom,
}

/// Drives a [`SessionService`] from connection to room.
pub struct Matchmaker<S> {
    session: S,
    config: LobbyConfig,
    phase: MatchmakingPhase,
    player_list_text: String,
    scene_request: Option<String>,
}

impl<S: SessionService> Matchmaker<S> {
    /// Matchmaker that has not connected yet.
    pub fn new(session: S, config: LobbyConfig) -> Self {
        Self {
            session,
            config,
            phase: MatchmakingPhase::Idle,
            player_list_text: String::new(),
            scene_request: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MatchmakingPhase {
        self.phase
    }

    /// Rendered player list (`Player (n/max):` then one nickname per line).
    pub fn player_list_text(&self) -> &str {
        &self.player_list_text
    }

    /// Scene the host should load, consumed on read.
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.scene_request.take()
    }

    /// The underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Start connecting.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        self.phase = MatchmakingPhase::Connecting;
        self.session.connect().await
    }

    /// React to one callback.
    pub async fn handle(&mut self, callback: &SessionCallback) -> Result<(), SessionError> {
        match callback {
            SessionCallback::ConnectedToMaster => {
                info!("Connected to master server");
                self.phase = MatchmakingPhase::JoiningLobby;
                self.session.join_lobby().await?;
            }
            SessionCallback::JoinedLobby => {
                info!("Joined lobby");
                self.phase = MatchmakingPhase::JoiningRoom;
                self.session.join_random_room().await?;
            }
            SessionCallback::JoinRandomFailed { reason } => {
                info!(%reason, max_players = self.config.max_players, "Random join failed, creating room");
                self.session
                    .create_room(RoomOptions { max_players: self.config.max_players })
                    .await?;
            }
            SessionCallback::CreatedRoom { .. } => {
                info!("Created room");
            }
            SessionCallback::JoinedRoom { .. } => {
                info!("Joined room");
                self.phase = MatchmakingPhase::InRoom;
                self.refresh_player_list().await;
                self.scene_request = Some(self.config.room_scene.clone());
            }
            SessionCallback::PlayerLeft(_) => {
                self.refresh_player_list().await;
            }
            SessionCallback::PlayerEntered(_) | SessionCallback::PlayerPropertiesUpdated { .. } => {}
        }
        Ok(())
    }

    /// Join-room button. Retries a random join when the session is ready;
    /// returns whether a request was issued.
    pub async fn on_join_room_button(&mut self) -> Result<bool, SessionError> {
        if !self.session.is_connected_and_ready().await {
            warn!("Join room pressed before the session is connected");
            return Ok(false);
        }
        self.phase = MatchmakingPhase::JoiningRoom;
        self.session.join_random_room().await?;
        Ok(true)
    }

    async fn refresh_player_list(&mut self) {
        let Some(room) = self.session.room().await else {
            return;
        };
        let mut text = format!("Player ({}/{}):\n", room.player_count(), self.config.max_players);
        for player in &room.players {
            text.push_str(&player.nickname);
            text.push('\n');
        }
        self.player_list_text = text;
    }
}
