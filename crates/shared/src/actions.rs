//! Action execution

use serde::{Deserialize, Serialize};

use twelveninja_domain::{PlayerId, TileAction, TileId};

use crate::ProtocolError;

pub use twelveninja_domain::{ActionOutcome, Rewards, StatsUpdate};

/// `{playerId, actionType, tileId}`. Ids travel as strings so that a missing
/// or malformed id is reported as a validation failure, not a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteActionRequest {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub action_type: String,
    #[serde(default)]
    pub tile_id: String,
}

/// A request whose fields have been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedAction {
    pub player_id: PlayerId,
    pub action: TileAction,
    pub tile_id: TileId,
}

impl ExecuteActionRequest {
    pub fn new(player_id: PlayerId, action: TileAction, tile_id: TileId) -> Self {
        Self {
            player_id: player_id.to_string(),
            action_type: action.as_str().to_string(),
            tile_id: tile_id.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedAction, ProtocolError> {
        Ok(ValidatedAction {
            player_id: PlayerId::parse(&self.player_id)?,
            action: self.action_type.parse()?,
            tile_id: TileId::parse(&self.tile_id)?,
        })
    }
}
