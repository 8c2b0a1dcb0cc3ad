//! Tile store
//!
//! Holds the last successful bounds query as an immutable snapshot. A new
//! query builds a new snapshot; a failed query keeps the old one. Fog is
//! projected for the viewer from `discovered_by`, never from the server's
//! `explored` flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use twelveninja_domain::{AxialBounds, AxialCoord, PlayerId, Tile, TileView};
use twelveninja_shared::TileBoundsRequest;

use crate::application::GameError;
use crate::ports::outbound::GameApiPort;

/// One bounds query's worth of tiles, fog already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSnapshot {
    generation: u64,
    bounds: AxialBounds,
    viewer: Option<PlayerId>,
    tiles: Vec<TileView>,
}

impl TileSnapshot {
    fn empty() -> Self {
        Self {
            generation: 0,
            bounds: AxialBounds::DEFAULT_VIEW,
            viewer: None,
            tiles: Vec::new(),
        }
    }

    /// Monotonic query number; 0 before the first successful query.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bounds(&self) -> AxialBounds {
        self.bounds
    }

    pub fn viewer(&self) -> Option<PlayerId> {
        self.viewer
    }

    pub fn tiles(&self) -> &[TileView] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_at(&self, coord: AxialCoord) -> Option<&TileView> {
        self.tiles.iter().find(|t| t.coord() == coord)
    }
}

pub struct TileStore {
    api: Arc<dyn GameApiPort>,
    snapshot: watch::Sender<Arc<TileSnapshot>>,
    issued: AtomicU64,
    closed: AtomicBool,
}

impl TileStore {
    pub fn new(api: Arc<dyn GameApiPort>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(TileSnapshot::empty()));
        Self {
            api,
            snapshot,
            issued: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Current snapshot. Cheap; never blocks on a query.
    pub fn snapshot(&self) -> Arc<TileSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Notified whenever a newer snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TileSnapshot>> {
        self.snapshot.subscribe()
    }

    /// Fetch the tiles inside `bounds` and project fog for `viewer`.
    ///
    /// Returns the snapshot in effect once the response has been handled.
    /// That is the new snapshot unless a later query already landed or the
    /// store was closed meanwhile, in which case the response is dropped.
    /// On error the previous snapshot stays in place.
    pub async fn query_bounds(
        &self,
        bounds: AxialBounds,
        viewer: Option<PlayerId>,
    ) -> Result<Arc<TileSnapshot>, GameError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let rows = match self
            .api
            .query_tiles(TileBoundsRequest::new(bounds, viewer))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, generation, "Tile query failed; keeping previous tiles");
                return Err(e.into());
            }
        };

        if self.is_closed() {
            tracing::debug!(generation, "Tile store closed; dropping response");
            return Ok(self.snapshot());
        }

        let tiles: Vec<TileView> = rows
            .into_iter()
            .map(|row| {
                let server_explored = row.explored;
                let tile = Tile::from(row);
                let view = match viewer {
                    Some(viewer) => tile.view_for(viewer),
                    None => TileView::fogged(tile),
                };
                if view.explored() != server_explored {
                    tracing::debug!(tile_id = %view.id(), "Server fog flag disagrees with discovered_by");
                }
                view
            })
            .collect();

        let next = Arc::new(TileSnapshot {
            generation,
            bounds,
            viewer,
            tiles,
        });
        let applied = self.snapshot.send_if_modified(|current| {
            if current.generation < generation {
                *current = next;
                true
            } else {
                false
            }
        });
        if !applied {
            tracing::debug!(generation, "Stale tile response dropped");
        }
        Ok(self.snapshot())
    }

    /// Stop applying responses. Queries already in flight still complete
    /// but their results are discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
