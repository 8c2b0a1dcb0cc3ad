//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, EventLogRepo, PlayerRepo, RandomPort, TileRepo};
use crate::use_cases::{
    actions::ExecuteAction,
    players::{CreatePlayer, GetPlayer},
    tiles::QueryTiles,
    ActionUseCases, PlayerUseCases, TileUseCases,
};

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub tile: Arc<dyn TileRepo>,
    pub player: Arc<dyn PlayerRepo>,
    pub events: Arc<dyn EventLogRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub tiles: TileUseCases,
    pub actions: ActionUseCases,
    pub players: PlayerUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repositories: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let tiles = TileUseCases::new(Arc::new(QueryTiles::new(repositories.tile.clone())));
        let actions = ActionUseCases::new(Arc::new(ExecuteAction::new(
            repositories.player.clone(),
            repositories.tile.clone(),
            repositories.events.clone(),
            clock,
            random.clone(),
        )));
        let players = PlayerUseCases::new(
            Arc::new(GetPlayer::new(repositories.player.clone())),
            Arc::new(CreatePlayer::new(
                repositories.player.clone(),
                repositories.tile.clone(),
                random,
            )),
        );

        Self {
            repositories,
            use_cases: UseCases {
                tiles,
                actions,
                players,
            },
        }
    }
}
