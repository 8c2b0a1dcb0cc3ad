//! Game session
//!
//! Ties one player's services together and enforces a single action in
//! flight. Tile queries and viewport changes do not go through here and
//! never wait on an action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use twelveninja_domain::{
    ActionOutcome, AxialBounds, Player, PlayerId, TileAction, TileId,
};

use super::{
    parse_action_target, ActionResolver, CombatEngine, PlayerState, TileSnapshot, TileStore,
};
use crate::application::GameError;
use crate::ports::outbound::{GameApiPort, RandomProvider, TimeProvider};

/// Clears the in-flight flag however the action ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, GameError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| GameError::ActionInFlight)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct GameSession {
    player: Arc<PlayerState>,
    tiles: Arc<TileStore>,
    resolver: ActionResolver,
    clock: Arc<dyn TimeProvider>,
    random: Arc<dyn RandomProvider>,
    in_flight: AtomicBool,
}

impl GameSession {
    pub fn new(
        api: Arc<dyn GameApiPort>,
        player_id: PlayerId,
        clock: Arc<dyn TimeProvider>,
        random: Arc<dyn RandomProvider>,
    ) -> Self {
        Self {
            player: Arc::new(PlayerState::new(api.clone(), player_id)),
            tiles: Arc::new(TileStore::new(api.clone())),
            resolver: ActionResolver::new(api),
            clock,
            random,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn player_state(&self) -> &Arc<PlayerState> {
        &self.player
    }

    pub fn tile_store(&self) -> &Arc<TileStore> {
        &self.tiles
    }

    pub fn is_action_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Session entry: load the player, then the tiles around them.
    pub async fn enter(&self, bounds: AxialBounds) -> Result<Player, GameError> {
        let player = self.player.refresh().await?;
        tracing::info!(player_id = %player.id(), username = player.username(), "Session started");
        if let Err(e) = self.load_tiles(bounds).await {
            tracing::warn!(error = %e, "Initial tile load failed");
        }
        Ok(player)
    }

    pub async fn load_tiles(&self, bounds: AxialBounds) -> Result<Arc<TileSnapshot>, GameError> {
        self.tiles
            .query_bounds(bounds, Some(self.player.player_id()))
            .await
    }

    /// Perform a map action, merging the engine's `newStats` on success.
    ///
    /// A second call while one is pending fails with `ActionInFlight`.
    pub async fn perform_action(
        &self,
        action: TileAction,
        tile_id: TileId,
    ) -> Result<ActionOutcome, GameError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        let player = self
            .player
            .snapshot()
            .await
            .ok_or(GameError::NoActivePlayer)?;

        let outcome = self.resolver.resolve(&player, action, tile_id).await?;
        self.player.apply_outcome(&outcome).await?;
        Ok(outcome)
    }

    /// As [`perform_action`](Self::perform_action), from UI strings.
    pub async fn perform_raw_action(
        &self,
        action: &str,
        tile_id: &str,
    ) -> Result<ActionOutcome, GameError> {
        let (action, tile_id) = parse_action_target(action, tile_id)?;
        self.perform_action(action, tile_id).await
    }

    /// Open an encounter against a copy of the current player.
    pub async fn start_combat(&self) -> Result<CombatEngine, GameError> {
        let player = self
            .player
            .snapshot()
            .await
            .ok_or(GameError::NoActivePlayer)?;
        Ok(CombatEngine::new(
            &player,
            self.clock.clone(),
            self.random.clone(),
        ))
    }

    /// Back on the map after combat or another screen: re-sync the player
    /// and the visible tiles. A failed tile reload keeps the old tiles.
    pub async fn return_to_map(&self, bounds: AxialBounds) -> Result<Player, GameError> {
        let player = self.player.refresh().await?;
        if let Err(e) = self.load_tiles(bounds).await {
            tracing::warn!(error = %e, "Tile reload failed");
        }
        Ok(player)
    }

    /// Tear down. Responses still in flight are discarded.
    pub fn close(&self) {
        self.tiles.close();
        tracing::debug!(player_id = %self.player.player_id(), "Session closed");
    }
}
