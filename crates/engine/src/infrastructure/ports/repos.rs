use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use twelveninja_domain::{
    ActionOutcome, AxialBounds, AxialCoord, EventId, Player, PlayerId, Tile, TileAction, TileId,
};

use super::RepoError;

// =============================================================================
// World
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TileRepo: Send + Sync {
    async fn get(&self, id: TileId) -> Result<Option<Tile>, RepoError>;
    async fn get_at(&self, coord: AxialCoord) -> Result<Option<Tile>, RepoError>;
    /// Every tile inside `bounds`, ordered by `(r, q)`.
    async fn list_in_bounds(&self, bounds: AxialBounds) -> Result<Vec<Tile>, RepoError>;
    /// Insert or replace. Coordinates are unique: saving a new id onto an
    /// occupied coordinate is a constraint violation.
    async fn save(&self, tile: &Tile) -> Result<(), RepoError>;
    /// Add `player_id` to the tile's `discovered_by` in place. Returns false
    /// when the player had already discovered it.
    async fn discover(&self, id: TileId, player_id: PlayerId) -> Result<bool, RepoError>;
}

// =============================================================================
// Players
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    /// Insert a new player, claiming its username. Usernames are unique
    /// ignoring ASCII case; a clash is a constraint violation.
    async fn create(&self, player: &Player) -> Result<(), RepoError>;
    async fn save(&self, player: &Player) -> Result<(), RepoError>;
}

// =============================================================================
// Event log
// =============================================================================

/// One resolved tile action, as recorded in the append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub id: EventId,
    pub player_id: PlayerId,
    pub tile_id: TileId,
    pub action: TileAction,
    pub outcome: ActionOutcome,
    pub occurred_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventLogRepo: Send + Sync {
    async fn append(&self, event: &ActionEvent) -> Result<(), RepoError>;
    /// Events for one player in append order.
    async fn list_for_player(&self, player_id: PlayerId) -> Result<Vec<ActionEvent>, RepoError>;
}
