//! Player fetch and creation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use twelveninja_domain::{Player, PlayerId, ResourcePool, TileId};

use crate::ProtocolError;

/// Full player record as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: Uuid,
    pub username: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub ryo: i64,
    pub stamina: i32,
    pub max_stamina: i32,
    pub hp: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub current_tile_id: Option<Uuid>,
    #[serde(default)]
    pub skill_points: u32,
}

fn default_level() -> u32 {
    1
}

impl From<&Player> for PlayerData {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().to_uuid(),
            username: player.username().to_string(),
            level: player.level(),
            xp: player.xp(),
            ryo: player.ryo(),
            stamina: player.stamina().current(),
            max_stamina: player.stamina().max(),
            hp: player.hp().current(),
            max_hp: player.hp().max(),
            current_tile_id: player.current_tile_id().map(TileId::to_uuid),
            skill_points: player.skill_points(),
        }
    }
}

/// Out-of-range pools are clamped rather than rejected.
impl From<PlayerData> for Player {
    fn from(data: PlayerData) -> Self {
        Player::from_parts(
            PlayerId::from_uuid(data.id),
            data.username,
            data.level,
            data.xp,
            data.ryo,
            ResourcePool::new(data.stamina, data.max_stamina),
            ResourcePool::new(data.hp, data.max_hp),
            data.current_tile_id.map(TileId::from_uuid),
            data.skill_points,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub username: String,
}

impl CreatePlayerRequest {
    pub fn username(&self) -> Result<&str, ProtocolError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ProtocolError::invalid("Username cannot be empty"));
        }
        Ok(username)
    }
}

/// Generic `{ok, error?}` acknowledgement, also used as the error body of
/// every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_row_clamps_into_invariants() {
        let row: PlayerData = serde_json::from_str(
            r#"{"id":"6f1c1f9e-3a0a-4c55-9f0e-0b7f2b6f9c11","username":"kaito",
                "ryo":-5,"stamina":70,"max_stamina":50,"hp":-1,"max_hp":100}"#,
        )
        .unwrap();
        let player = Player::from(row);
        assert_eq!(player.level(), 1);
        assert_eq!(player.stamina().current(), 50);
        assert_eq!(player.hp().current(), 0);
        assert_eq!(player.ryo(), 0);
    }

    #[test]
    fn blank_username_is_invalid() {
        let request = CreatePlayerRequest {
            username: "   ".into(),
        };
        assert!(request.username().is_err());
    }

    #[test]
    fn ack_omits_error_when_ok() {
        let json = serde_json::to_string(&AckResponse::ok()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }
}
