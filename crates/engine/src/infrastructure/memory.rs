//! In-memory storage adapters.
//!
//! Backed by `DashMap`, so handlers never hold a lock across an await.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use twelveninja_domain::{AxialBounds, AxialCoord, Player, PlayerId, Tile, TileId};

use super::ports::{ActionEvent, EventLogRepo, PlayerRepo, RepoError, TileRepo};

#[derive(Debug, Default)]
pub struct InMemoryTileRepo {
    tiles: DashMap<TileId, Tile>,
    by_coord: DashMap<AxialCoord, TileId>,
}

impl InMemoryTileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repo pre-populated with `tiles`. Later duplicates of a
    /// coordinate are rejected.
    pub fn seeded(tiles: impl IntoIterator<Item = Tile>) -> Result<Self, RepoError> {
        let repo = Self::new();
        for tile in tiles {
            repo.insert(tile)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn insert(&self, tile: Tile) -> Result<(), RepoError> {
        match self.by_coord.entry(tile.coord()) {
            Entry::Occupied(existing) if *existing.get() != tile.id() => {
                return Err(RepoError::constraint(format!(
                    "tile {} already occupies {}",
                    existing.get(),
                    tile.coord()
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(tile.id());
            }
        }
        self.tiles.insert(tile.id(), tile);
        Ok(())
    }
}

#[async_trait]
impl TileRepo for InMemoryTileRepo {
    async fn get(&self, id: TileId) -> Result<Option<Tile>, RepoError> {
        Ok(self.tiles.get(&id).map(|t| t.value().clone()))
    }

    async fn get_at(&self, coord: AxialCoord) -> Result<Option<Tile>, RepoError> {
        let Some(id) = self.by_coord.get(&coord).map(|id| *id.value()) else {
            return Ok(None);
        };
        self.get(id).await
    }

    async fn list_in_bounds(&self, bounds: AxialBounds) -> Result<Vec<Tile>, RepoError> {
        let mut tiles: Vec<Tile> = self
            .tiles
            .iter()
            .filter(|entry| bounds.contains(entry.value().coord()))
            .map(|entry| entry.value().clone())
            .collect();
        tiles.sort_by_key(|t| (t.coord().r, t.coord().q));
        Ok(tiles)
    }

    async fn save(&self, tile: &Tile) -> Result<(), RepoError> {
        if let Some(existing) = self.tiles.get(&tile.id()) {
            if existing.coord() != tile.coord() {
                return Err(RepoError::constraint(format!(
                    "tile {} cannot move from {} to {}",
                    tile.id(),
                    existing.coord(),
                    tile.coord()
                )));
            }
        }
        self.insert(tile.clone())
    }

    async fn discover(&self, id: TileId, player_id: PlayerId) -> Result<bool, RepoError> {
        let mut tile = self
            .tiles
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Tile", id))?;
        Ok(tile.discover(player_id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPlayerRepo {
    players: DashMap<PlayerId, Player>,
    /// Lowercased username -> owner.
    usernames: DashMap<String, PlayerId>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.players.get(&id).map(|p| p.value().clone()))
    }

    async fn create(&self, player: &Player) -> Result<(), RepoError> {
        match self.usernames.entry(player.username().to_ascii_lowercase()) {
            Entry::Occupied(_) => {
                return Err(RepoError::constraint(format!(
                    "username {} is taken",
                    player.username()
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(player.id());
            }
        }
        self.players.insert(player.id(), player.clone());
        Ok(())
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        self.players.insert(player.id(), player.clone());
        Ok(())
    }
}

/// Append-only action log, partitioned by player.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: DashMap<PlayerId, Vec<ActionEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventLogRepo for InMemoryEventLog {
    async fn append(&self, event: &ActionEvent) -> Result<(), RepoError> {
        self.events
            .entry(event.player_id)
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn list_for_player(&self, player_id: PlayerId) -> Result<Vec<ActionEvent>, RepoError> {
        Ok(self
            .events
            .get(&player_id)
            .map(|events| events.value().clone())
            .unwrap_or_default())
    }
}
