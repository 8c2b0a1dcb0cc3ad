//! Create player use case.
//!
//! Stands in for the account-creation collaborator: one player per username,
//! starting at full resources on the home tile, which is discovered on entry.

use std::sync::Arc;

use twelveninja_domain::{AxialCoord, DomainError, Player, PlayerId};

use crate::infrastructure::ports::{PlayerRepo, RandomPort, RepoError, TileRepo};

pub struct CreatePlayer {
    players: Arc<dyn PlayerRepo>,
    tiles: Arc<dyn TileRepo>,
    random: Arc<dyn RandomPort>,
}

impl CreatePlayer {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        tiles: Arc<dyn TileRepo>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            players,
            tiles,
            random,
        }
    }

    pub async fn execute(&self, username: &str) -> Result<Player, CreatePlayerError> {
        let id = PlayerId::from_uuid(self.random.gen_uuid());
        let mut player = Player::new(id, username)?;

        let home = self.tiles.get_at(AxialCoord::ORIGIN).await?;
        if let Some(home) = &home {
            player.move_to(home.id());
        }

        // The repo owns the username claim; nothing else is written until it holds.
        self.players.create(&player).await.map_err(|e| match e {
            RepoError::ConstraintViolation(_) => {
                CreatePlayerError::UsernameTaken(username.to_string())
            }
            other => CreatePlayerError::Repo(other),
        })?;

        match home {
            Some(home) => {
                self.tiles.discover(home.id(), id).await?;
            }
            None => tracing::warn!(player_id = %id, "No home tile; player starts off-map"),
        }

        tracing::info!(player_id = %id, username = %username, "Player created");
        Ok(player)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePlayerError {
    #[error("Username already taken: {0}")]
    UsernameTaken(String),
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use twelveninja_domain::Tile;

    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::memory::{InMemoryPlayerRepo, InMemoryTileRepo};
    use crate::infrastructure::ports::{MockPlayerRepo, MockTileRepo};

    #[tokio::test]
    async fn new_player_lands_on_discovered_home_tile() {
        let home = Tile::new(AxialCoord::ORIGIN, "village");
        let home_id = home.id();

        let mut players = MockPlayerRepo::new();
        players
            .expect_create()
            .withf(move |p| p.current_tile_id() == Some(home_id) && p.hp().current() == 100)
            .times(1)
            .returning(|_| Ok(()));

        let mut tiles = MockTileRepo::new();
        tiles
            .expect_get_at()
            .returning(move |_| Ok(Some(home.clone())));
        tiles
            .expect_discover()
            .withf(move |tile_id, _| *tile_id == home_id)
            .times(1)
            .returning(|_, _| Ok(true));
        tiles.expect_save().times(0);

        let player = CreatePlayer::new(Arc::new(players), Arc::new(tiles), Arc::new(FixedRandom::new(0)))
            .execute("kaito")
            .await
            .unwrap();
        assert_eq!(player.username(), "kaito");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_before_discovery() {
        let home = Tile::new(AxialCoord::ORIGIN, "village");

        let mut players = MockPlayerRepo::new();
        players
            .expect_create()
            .returning(|_| Err(RepoError::constraint("username kaito is taken")));
        players.expect_save().times(0);

        let mut tiles = MockTileRepo::new();
        tiles
            .expect_get_at()
            .returning(move |_| Ok(Some(home.clone())));
        tiles.expect_discover().times(0);

        let err = CreatePlayer::new(Arc::new(players), Arc::new(tiles), Arc::new(FixedRandom::new(0)))
            .execute("kaito")
            .await
            .unwrap_err();
        assert!(matches!(err, CreatePlayerError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn concurrent_creates_share_one_username_and_keep_every_discovery() {
        let home = Tile::new(AxialCoord::ORIGIN, "village");
        let home_id = home.id();
        let players = Arc::new(InMemoryPlayerRepo::new());
        let tiles = Arc::new(InMemoryTileRepo::seeded([home]).unwrap());
        let create = Arc::new(CreatePlayer::new(
            players.clone(),
            tiles.clone(),
            Arc::new(FixedRandom::new(0)),
        ));

        let attempts = ["kaito", "KAITO", "sora", "hina"].map(|name| {
            let create = create.clone();
            tokio::spawn(async move { create.execute(name).await })
        });
        let mut created = Vec::new();
        let mut taken = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(player) => created.push(player.id()),
                Err(CreatePlayerError::UsernameTaken(_)) => taken += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((created.len(), taken), (3, 1));

        let home = tiles.get(home_id).await.unwrap().unwrap();
        assert_eq!(home.discovered_by().len(), 3);
        assert!(created.iter().all(|id| home.is_discovered_by(*id)));
    }
}
