//! In-process session service.
//!
//! [`LocalCloud`] plays the hosted service: it owns every room behind one
//! lock and holds the sending half of each client's callback channel.
//! Each [`LocalSession`] is one client's handle onto it and owns the
//! receiving half, so several clients can share a room inside a single
//! process (demo binary, tests).

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::debug;

use super::session::{RoomSnapshot, SessionCallback, SessionError, SessionService};
use super::{PlayerId, PlayerInfo, PlayerProps, RoomId, RoomOptions};

/// A room hosted by the cloud.
#[derive(Debug)]
struct LocalRoom {
    options: RoomOptions,
    /// Join order.
    members: Vec<PlayerId>,
}

impl LocalRoom {
    /// Capacity zero means unlimited.
    fn has_space(&self) -> bool {
        self.options.max_players == 0 || self.members.len() < self.options.max_players
    }
}

/// Per-client state.
#[derive(Debug)]
struct Client {
    nickname: String,
    connected: bool,
    in_lobby: bool,
    room: Option<RoomId>,
    props: PlayerProps,
    /// Callback channel to the client's session.
    sender: mpsc::UnboundedSender<SessionCallback>,
}

#[derive(Debug, Default)]
struct CloudState {
    rooms: BTreeMap<RoomId, LocalRoom>,
    clients: BTreeMap<PlayerId, Client>,
}

impl CloudState {
    fn client(&self, id: PlayerId) -> Result<&Client, SessionError> {
        self.clients.get(&id).ok_or(SessionError::PlayerNotFound)
    }

    fn client_mut(&mut self, id: PlayerId) -> Result<&mut Client, SessionError> {
        self.clients.get_mut(&id).ok_or(SessionError::PlayerNotFound)
    }

    /// Connected client outside any room.
    fn require_free(&self, id: PlayerId) -> Result<(), SessionError> {
        let client = self.client(id)?;
        if !client.connected {
            return Err(SessionError::NotConnected);
        }
        if client.room.is_some() {
            return Err(SessionError::AlreadyInRoom);
        }
        Ok(())
    }

    fn info(&self, id: PlayerId) -> Option<PlayerInfo> {
        self.clients.get(&id).map(|c| PlayerInfo {
            id,
            nickname: c.nickname.clone(),
            props: c.props.clone(),
        })
    }

    fn snapshot(&self, room_id: RoomId) -> Option<RoomSnapshot> {
        let room = self.rooms.get(&room_id)?;
        Some(RoomSnapshot {
            id: room_id,
            max_players: room.options.max_players,
            players: room.members.iter().filter_map(|m| self.info(*m)).collect(),
        })
    }

    fn notify(&self, id: PlayerId, callback: SessionCallback) {
        if let Some(client) = self.clients.get(&id) {
            let _ = client.sender.send(callback);
        }
    }

    fn enter(&mut self, id: PlayerId, room_id: RoomId) -> Result<(), SessionError> {
        let info = self.info(id).ok_or(SessionError::PlayerNotFound)?;
        let room = self.rooms.get_mut(&room_id).ok_or(SessionError::NoRoomAvailable)?;
        if !room.has_space() {
            return Err(SessionError::RoomFull);
        }
        room.members.push(id);
        let others: Vec<PlayerId> = room.members.iter().copied().filter(|m| *m != id).collect();

        let client = self.client_mut(id)?;
        client.room = Some(room_id);
        client.in_lobby = false;
        self.notify(id, SessionCallback::JoinedRoom { room: room_id });

        for other in others {
            self.notify(other, SessionCallback::PlayerEntered(info.clone()));
        }
        debug!(player = %id, members = self.rooms.get(&room_id).map_or(0, |r| r.members.len()), "player entered room");
        Ok(())
    }

    fn leave(&mut self, id: PlayerId) -> Result<(), SessionError> {
        let info = self.info(id).ok_or(SessionError::PlayerNotFound)?;
        let client = self.client_mut(id)?;
        let room_id = client.room.take().ok_or(SessionError::NotInRoom)?;

        let mut others = Vec::new();
        if let Some(room) = self.rooms.get_mut(&room_id) {
            room.members.retain(|m| *m != id);
            others = room.members.clone();
            if room.members.is_empty() {
                self.rooms.remove(&room_id);
            }
        }
        for other in others {
            self.notify(other, SessionCallback::PlayerLeft(info.clone()));
        }
        debug!(player = %id, "player left room");
        Ok(())
    }
}

/// The hosted side of the in-process service.
#[derive(Debug, Default)]
pub struct LocalCloud {
    state: RwLock<CloudState>,
}

impl LocalCloud {
    /// Empty cloud.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a new, disconnected client.
    pub async fn session(self: &Arc<Self>, nickname: impl Into<String>) -> LocalSession {
        let player = PlayerId::new();
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.state.write().await;
        state.clients.insert(player, Client {
            nickname: nickname.into(),
            connected: false,
            in_lobby: false,
            room: None,
            props: PlayerProps::default(),
            sender,
        });
        LocalSession {
            cloud: Arc::clone(self),
            player,
            inbox: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Number of open rooms.
    pub async fn room_count(&self) -> usize {
        self.state.read().await.rooms.len()
    }
}

/// One client's handle onto a [`LocalCloud`].
#[derive(Debug, Clone)]
pub struct LocalSession {
    cloud: Arc<LocalCloud>,
    player: PlayerId,
    /// Shared by every clone of this handle.
    inbox: Arc<Mutex<mpsc::UnboundedReceiver<SessionCallback>>>,
}

impl LocalSession {
    /// Leave any room and drop the master connection.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        if state.client(self.player)?.room.is_some() {
            state.leave(self.player)?;
        }
        let client = state.client_mut(self.player)?;
        client.connected = false;
        client.in_lobby = false;
        Ok(())
    }

    /// Whether this client sits in the lobby.
    pub async fn in_lobby(&self) -> bool {
        let state = self.cloud.state.read().await;
        state.client(self.player).map_or(false, |c| c.in_lobby)
    }
}

impl SessionService for LocalSession {
    fn local_player(&self) -> PlayerId {
        self.player
    }

    async fn connect(&self) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        let client = state.client_mut(self.player)?;
        client.connected = true;
        state.notify(self.player, SessionCallback::ConnectedToMaster);
        Ok(())
    }

    async fn is_connected_and_ready(&self) -> bool {
        let state = self.cloud.state.read().await;
        state.client(self.player).map_or(false, |c| c.connected)
    }

    async fn join_lobby(&self) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        state.require_free(self.player)?;
        let client = state.client_mut(self.player)?;
        client.in_lobby = true;
        state.notify(self.player, SessionCallback::JoinedLobby);
        Ok(())
    }

    async fn join_random_room(&self) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        state.require_free(self.player)?;

        let open = state
            .rooms
            .iter()
            .find(|(_, room)| room.has_space())
            .map(|(id, _)| *id);

        match open {
            Some(room_id) => state.enter(self.player, room_id),
            None => {
                state.notify(self.player, SessionCallback::JoinRandomFailed {
                    reason: SessionError::NoRoomAvailable,
                });
                Ok(())
            }
        }
    }

    async fn join_room(&self, room: RoomId) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        state.require_free(self.player)?;
        state.enter(self.player, room)
    }

    async fn create_room(&self, options: RoomOptions) -> Result<RoomId, SessionError> {
        let mut state = self.cloud.state.write().await;
        state.require_free(self.player)?;

        let id = uuid::Uuid::new_v4().into_bytes();
        state.rooms.insert(id, LocalRoom { options, members: Vec::new() });
        state.notify(self.player, SessionCallback::CreatedRoom { room: id });
        state.enter(self.player, id)?;
        Ok(id)
    }

    async fn leave_room(&self) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        state.leave(self.player)
    }

    async fn set_local_properties(&self, props: PlayerProps) -> Result<(), SessionError> {
        let mut state = self.cloud.state.write().await;
        let client = state.client_mut(self.player)?;
        let room_id = client.room.ok_or(SessionError::NotInRoom)?;
        client.props = props.clone();

        let members = state.rooms.get(&room_id).map(|r| r.members.clone()).unwrap_or_default();
        for member in members {
            state.notify(member, SessionCallback::PlayerPropertiesUpdated {
                player: self.player,
                props: props.clone(),
            });
        }
        Ok(())
    }

    async fn room(&self) -> Option<RoomSnapshot> {
        let state = self.cloud.state.read().await;
        let room_id = state.clients.get(&self.player)?.room?;
        state.snapshot(room_id)
    }

    async fn poll(&self) -> Vec<SessionCallback> {
        let mut inbox = self.inbox.lock().await;
        let mut callbacks = Vec::new();
        while let Ok(callback) = inbox.try_recv() {
            callbacks.push(callback);
        }
        callbacks
    }
}
