//! Action resolver
//!
//! Checks the action table locally, then asks the engine to resolve.
//! Stamina shortfalls never reach the network.

use std::sync::Arc;

use twelveninja_domain::{ActionOutcome, Player, TileAction, TileId};
use twelveninja_shared::ExecuteActionRequest;

use crate::application::GameError;
use crate::ports::outbound::GameApiPort;

/// Parse the `(action, tile id)` pair a UI hands over as strings.
pub fn parse_action_target(action: &str, tile_id: &str) -> Result<(TileAction, TileId), GameError> {
    let action = action
        .parse::<TileAction>()
        .map_err(|e| GameError::validation(e.to_string()))?;
    let tile_id = TileId::parse(tile_id).map_err(|e| GameError::validation(e.to_string()))?;
    Ok((action, tile_id))
}

pub struct ActionResolver {
    api: Arc<dyn GameApiPort>,
}

impl ActionResolver {
    pub fn new(api: Arc<dyn GameApiPort>) -> Self {
        Self { api }
    }

    /// Resolve `action` on `tile_id` for `player`.
    ///
    /// `Ok` carries the engine's outcome, including `success == false`
    /// rejections. Does not touch player state; see `PlayerState::apply_outcome`.
    pub async fn resolve(
        &self,
        player: &Player,
        action: TileAction,
        tile_id: TileId,
    ) -> Result<ActionOutcome, GameError> {
        action.check(player)?;

        let request = ExecuteActionRequest::new(player.id(), action, tile_id);
        let outcome = self.api.execute_action(request).await.map_err(|e| {
            tracing::error!(
                player_id = %player.id(),
                tile_id = %tile_id,
                action = %action,
                error = %e,
                "Action request failed"
            );
            GameError::from(e)
        })?;

        if outcome.success {
            tracing::info!(player_id = %player.id(), action = %action, "Action resolved");
        } else {
            tracing::info!(
                player_id = %player.id(),
                action = %action,
                reason = %outcome.message,
                "Action rejected by server"
            );
        }
        Ok(outcome)
    }
}
