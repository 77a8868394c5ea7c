//! Role selection inside a room.
//!
//! Santa is exclusive; Reindeer has a fixed number of slots. Claims are
//! stored in the player's replicated properties, so every member sees the
//! same assignment and the checks below run against the room snapshot.

use thiserror::Error;
use tracing::info;

use super::session::{RoomSnapshot, SessionCallback, SessionError, SessionService};
use super::{LobbyConfig, PlayerId, PlayerProps, Role};

/// Status shown when a claim is refused.
pub const ROLE_UNAVAILABLE_TEXT: &str = "You Can't select this role";

/// Role selection errors.
#[derive(Debug, Error)]
pub enum RoleError {
    /// Role has no free slot.
    #[error("Role {0} is not available")]
    Unavailable(Role),

    /// Selection needs room membership.
    #[error("Not in a room")]
    NotInRoom,

    /// Writing the claim failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

fn holders(room: &RoomSnapshot, role: Role) -> impl Iterator<Item = PlayerId> + '_ {
    room.players
        .iter()
        .filter(move |p| p.props.role == Some(role))
        .map(|p| p.id)
}

/// Whether someone other than `me` holds Santa.
pub fn santa_taken(room: &RoomSnapshot, me: PlayerId) -> bool {
    holders(room, Role::Santa).any(|id| id != me)
}

/// Reindeer held by players other than `me`.
pub fn reindeer_count(room: &RoomSnapshot, me: PlayerId) -> usize {
    holders(room, Role::Reindeer).filter(|id| *id != me).count()
}

/// Whether `me` may claim `role` in `room`.
pub fn is_available(room: &RoomSnapshot, me: PlayerId, role: Role, max_reindeer: usize) -> bool {
    match role {
        Role::Santa => !santa_taken(room, me),
        Role::Reindeer => reindeer_count(room, me) < max_reindeer,
    }
}

/// Render the room roster (`Player List` then `nick : role` lines).
pub fn render_player_list(room: &RoomSnapshot) -> String {
    let mut text = String::from("Player List\n");
    for player in &room.players {
        let role = player.props.role.map_or("Unselected", Role::as_str);
        text.push_str(&format!("{} : {}\n", player.nickname, role));
    }
    text
}

/// Role picker for the local player.
pub struct RoleSelector<S> {
    session: S,
    max_reindeer: usize,
    status_text: String,
    player_list_text: String,
    santa_interactable: bool,
    reindeer_interactable: bool,
}

impl<S: SessionService> RoleSelector<S> {
    /// Selector with empty status.
    pub fn new(session: S, config: &LobbyConfig) -> Self {
        Self {
            session,
            max_reindeer: config.max_reindeer,
            status_text: String::new(),
            player_list_text: String::new(),
            santa_interactable: true,
            reindeer_interactable: true,
        }
    }

    /// Last selection outcome.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Rendered roster.
    pub fn player_list_text(&self) -> &str {
        &self.player_list_text
    }

    /// Santa button enabled.
    pub fn santa_interactable(&self) -> bool {
        self.santa_interactable
    }

    /// Reindeer button enabled.
    pub fn reindeer_interactable(&self) -> bool {
        self.reindeer_interactable
    }

    /// Role held by the local player.
    pub async fn local_role(&self) -> Option<Role> {
        let me = self.session.local_player();
        self.session.room().await?.player(me)?.props.role
    }

    /// Initial paint once the room scene is shown.
    pub async fn refresh(&mut self) {
        self.refresh_buttons().await;
        self.refresh_player_list().await;
    }

    /// Claim `role` for the local player.
    pub async fn try_select(&mut self, role: Role) -> Result<Role, RoleError> {
        let room = self.session.room().await.ok_or(RoleError::NotInRoom)?;
        let me = self.session.local_player();

        let result = if is_available(&room, me, role, self.max_reindeer) {
            self.session
                .set_local_properties(PlayerProps { role: Some(role) })
                .await?;
            self.status_text = format!("{role} selected");
            info!(player = %me, %role, "Role selected");
            Ok(role)
        } else {
            self.status_text = ROLE_UNAVAILABLE_TEXT.to_string();
            Err(RoleError::Unavailable(role))
        };

        self.refresh().await;
        result
    }

    /// React to one callback.
    pub async fn handle(&mut self, callback: &SessionCallback) {
        match callback {
            SessionCallback::PlayerPropertiesUpdated { .. } | SessionCallback::JoinedRoom { .. } => {
                self.refresh().await;
            }
            SessionCallback::PlayerEntered(_) | SessionCallback::PlayerLeft(_) => {
                self.refresh_player_list().await;
            }
            _ => {}
        }
    }

    async fn refresh_buttons(&mut self) {
        let Some(room) = self.session.room().await else {
            return;
        };
        let me = self.session.local_player();
        self.santa_interactable = is_available(&room, me, Role::Santa, self.max_reindeer);
        self.reindeer_interactable = is_available(&room, me, Role::Reindeer, self.max_reindeer);
    }

    async fn refresh_player_list(&mut self) {
        if let Some(room) = self.session.room().await {
            self.player_list_text = render_player_list(&room);
        }
    }
}
