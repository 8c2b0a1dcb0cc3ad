//! Tile use cases.

mod query_tiles;

pub use query_tiles::{QueryTiles, QueryTilesError};

use std::sync::Arc;

/// Container for tile use cases.
pub struct TileUseCases {
    pub query: Arc<QueryTiles>,
}

impl TileUseCases {
    pub fn new(query: Arc<QueryTiles>) -> Self {
        Self { query }
    }
}
