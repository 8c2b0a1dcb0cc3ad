//! Player state
//!
//! The client's copy of the active player. Only `refresh` and
//! `apply_outcome` write it; everything else reads snapshots.

use std::sync::Arc;

use tokio::sync::RwLock;
use twelveninja_domain::{ActionOutcome, Player, PlayerId};

use crate::application::GameError;
use crate::ports::outbound::GameApiPort;

pub struct PlayerState {
    api: Arc<dyn GameApiPort>,
    player_id: PlayerId,
    current: RwLock<Option<Player>>,
}

impl PlayerState {
    pub fn new(api: Arc<dyn GameApiPort>, player_id: PlayerId) -> Self {
        Self {
            api,
            player_id,
            current: RwLock::new(None),
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub async fn snapshot(&self) -> Option<Player> {
        self.current.read().await.clone()
    }

    /// Replace the local copy with the engine's. Leaves it untouched on error.
    pub async fn refresh(&self) -> Result<Player, GameError> {
        let data = self.api.fetch_player(self.player_id).await.map_err(|e| {
            tracing::warn!(player_id = %self.player_id, error = %e, "Player refresh failed");
            GameError::from(e)
        })?;

        let player = Player::from(data);
        if player.id() != self.player_id {
            return Err(GameError::Server(format!(
                "expected player {}, engine returned {}",
                self.player_id,
                player.id()
            )));
        }

        *self.current.write().await = Some(player.clone());
        tracing::debug!(player_id = %self.player_id, "Player refreshed");
        Ok(player)
    }

    /// Merge the authoritative `newStats` of a successful outcome.
    ///
    /// Failed outcomes and outcomes without `newStats` leave the player as is.
    pub async fn apply_outcome(&self, outcome: &ActionOutcome) -> Result<Player, GameError> {
        let mut guard = self.current.write().await;
        let player = guard.as_mut().ok_or(GameError::NoActivePlayer)?;
        if outcome.success {
            if let Some(stats) = &outcome.new_stats {
                player.merge_stats(stats);
            }
        }
        Ok(player.clone())
    }
}
