//! Bounded tile query.

use std::sync::Arc;

use twelveninja_domain::{AxialBounds, PlayerId, Tile};

use crate::infrastructure::ports::{RepoError, TileRepo};

/// Read-only rectangle query over the world.
pub struct QueryTiles {
    tiles: Arc<dyn TileRepo>,
}

impl QueryTiles {
    pub fn new(tiles: Arc<dyn TileRepo>) -> Self {
        Self { tiles }
    }

    /// All tiles inside `bounds`. `viewer` only affects logging; fog is
    /// projected by the caller from each tile's discovery set.
    pub async fn execute(
        &self,
        bounds: AxialBounds,
        viewer: Option<PlayerId>,
    ) -> Result<Vec<Tile>, QueryTilesError> {
        let tiles = self.tiles.list_in_bounds(bounds).await?;
        tracing::debug!(
            q_min = bounds.q_min(),
            q_max = bounds.q_max(),
            r_min = bounds.r_min(),
            r_max = bounds.r_max(),
            viewer = ?viewer,
            count = tiles.len(),
            "Tile bounds query"
        );
        Ok(tiles)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryTilesError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTileRepo;
    use twelveninja_domain::AxialCoord;

    #[tokio::test]
    async fn passes_bounds_through_to_storage() {
        let bounds = AxialBounds::new(-2, 2, -1, 1).unwrap();
        let mut repo = MockTileRepo::new();
        repo.expect_list_in_bounds()
            .withf(move |b| *b == bounds)
            .times(1)
            .returning(|_| Ok(vec![Tile::new(AxialCoord::ORIGIN, "village")]));

        let tiles = QueryTiles::new(Arc::new(repo))
            .execute(bounds, None)
            .await
            .unwrap();
        assert_eq!(tiles.len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let mut repo = MockTileRepo::new();
        repo.expect_list_in_bounds()
            .returning(|_| Err(RepoError::database("list_in_bounds", "offline")));

        let err = QueryTiles::new(Arc::new(repo))
            .execute(AxialBounds::DEFAULT_VIEW, Some(PlayerId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryTilesError::Repo(RepoError::Database { .. })));
    }
}
