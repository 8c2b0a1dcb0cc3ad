//! World tiles and per-player fog of war

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value_objects::AxialCoord;
use crate::{DomainError, PlayerId, TileId};

/// A single cell of the world map.
///
/// Coordinates are fixed at creation. `discovered_by` only ever grows; owner
/// and metadata change as the world evolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    coord: AxialCoord,
    tile_type: String,
    owner_code: Option<String>,
    discovered_by: BTreeSet<PlayerId>,
    metadata: Map<String, Value>,
}

impl Tile {
    pub fn new(coord: AxialCoord, tile_type: impl Into<String>) -> Self {
        Self {
            id: TileId::new(),
            coord,
            tile_type: tile_type.into(),
            owner_code: None,
            discovered_by: BTreeSet::new(),
            metadata: Map::new(),
        }
    }

    /// Reconstruct from stored data
    pub fn from_parts(
        id: TileId,
        coord: AxialCoord,
        tile_type: String,
        owner_code: Option<String>,
        discovered_by: BTreeSet<PlayerId>,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            coord,
            tile_type,
            owner_code,
            discovered_by,
            metadata,
        }
    }

    // Read-only accessors

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> AxialCoord {
        self.coord
    }

    pub fn tile_type(&self) -> &str {
        &self.tile_type
    }

    pub fn owner_code(&self) -> Option<&str> {
        self.owner_code.as_deref()
    }

    pub fn discovered_by(&self) -> &BTreeSet<PlayerId> {
        &self.discovered_by
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn is_discovered_by(&self, player: PlayerId) -> bool {
        self.discovered_by.contains(&player)
    }

    // Builder-style methods

    pub fn with_id(mut self, id: TileId) -> Self {
        self.id = id;
        self
    }

    pub fn with_owner(mut self, owner_code: impl Into<String>) -> Self {
        self.owner_code = Some(owner_code.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn discovered_by_player(mut self, player: PlayerId) -> Self {
        self.discovered_by.insert(player);
        self
    }

    // Mutations

    /// Record that `player` has discovered this tile. Returns `true` the first time.
    pub fn discover(&mut self, player: PlayerId) -> bool {
        self.discovered_by.insert(player)
    }

    pub fn set_owner(&mut self, owner_code: Option<String>) {
        self.owner_code = owner_code;
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }

    // Metadata views

    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(Value::as_str)
    }

    /// Difficulty rating, defaulting to `Easy` when absent or unrecognised.
    pub fn difficulty(&self) -> Difficulty {
        self.metadata
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Fog-of-war projection of this tile for one viewer.
    pub fn view_for(&self, viewer: PlayerId) -> TileView {
        TileView {
            explored: self.is_discovered_by(viewer),
            tile: self.clone(),
        }
    }
}

/// A tile as seen by a particular player.
///
/// `explored` is derived from `discovered_by` and nothing else; there is no
/// partially-seen state.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    tile: Tile,
    explored: bool,
}

impl TileView {
    /// View for nobody in particular: always under fog.
    pub fn fogged(tile: Tile) -> Self {
        Self {
            tile,
            explored: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.tile.id()
    }

    pub fn coord(&self) -> AxialCoord {
        self.tile.coord()
    }

    pub fn explored(&self) -> bool {
        self.explored
    }

    /// Full tile detail, or `None` when the tile is still under fog.
    pub fn detail(&self) -> Option<&Tile> {
        self.explored.then_some(&self.tile)
    }

    /// The underlying tile regardless of fog (for hit-testing and layout only).
    pub fn tile(&self) -> &Tile {
        &self.tile
    }
}

/// How dangerous a tile is to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "very hard" | "very_hard" | "veryhard" => Ok(Self::VeryHard),
            _ => Err(DomainError::parse(format!("Unknown difficulty: {}", s))),
        }
    }
}
