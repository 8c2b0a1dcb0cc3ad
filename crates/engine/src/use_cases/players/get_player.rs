use std::sync::Arc;

use twelveninja_domain::{Player, PlayerId};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

/// Authoritative player fetch.
pub struct GetPlayer {
    players: Arc<dyn PlayerRepo>,
}

impl GetPlayer {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, id: PlayerId) -> Result<Player, GetPlayerError> {
        self.players
            .get(id)
            .await?
            .ok_or(GetPlayerError::NotFound(id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetPlayerError {
    #[error("Player not found: {0}")]
    NotFound(PlayerId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
