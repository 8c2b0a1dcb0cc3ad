//! Player use cases.

mod create_player;
mod get_player;

pub use create_player::{CreatePlayer, CreatePlayerError};
pub use get_player::{GetPlayer, GetPlayerError};

use std::sync::Arc;

/// Container for player use cases.
pub struct PlayerUseCases {
    pub get: Arc<GetPlayer>,
    pub create: Arc<CreatePlayer>,
}

impl PlayerUseCases {
    pub fn new(get: Arc<GetPlayer>, create: Arc<CreatePlayer>) -> Self {
        Self { get, create }
    }
}
