//! Execute action use case.
//!
//! Resolves scout/forage/rest against the stored player and tile, persists
//! the result and appends it to the event log. The returned outcome carries
//! the authoritative hp/stamina/ryo in `newStats`.
//!
//! Actions for one player run one at a time, so overlapping requests each
//! see the previous request's writes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use twelveninja_domain::{
    ActionOutcome, EventId, PlayerId, Rewards, StatsUpdate, TileAction, TileId,
};

use super::rules::{hazard_for, rule_for};
use crate::infrastructure::ports::{
    ActionEvent, ClockPort, EventLogRepo, PlayerRepo, RandomPort, RepoError, TileRepo,
};

pub struct ExecuteAction {
    players: Arc<dyn PlayerRepo>,
    tiles: Arc<dyn TileRepo>,
    events: Arc<dyn EventLogRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    player_locks: DashMap<PlayerId, Arc<Mutex<()>>>,
}

impl ExecuteAction {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        tiles: Arc<dyn TileRepo>,
        events: Arc<dyn EventLogRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            players,
            tiles,
            events,
            clock,
            random,
            player_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, player_id: PlayerId) -> Arc<Mutex<()>> {
        self.player_locks.entry(player_id).or_default().clone()
    }

    /// Resolve one action.
    ///
    /// # Returns
    /// * `Ok(outcome)` - resolved; `outcome.success` is false when a
    ///   precondition failed, in which case nothing was written
    /// * `Err(ExecuteActionError)` - unknown player/tile or storage failure
    pub async fn execute(
        &self,
        player_id: PlayerId,
        action: TileAction,
        tile_id: TileId,
    ) -> Result<ActionOutcome, ExecuteActionError> {
        let lock = self.lock_for(player_id);
        let _turn = lock.lock().await;

        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(ExecuteActionError::PlayerNotFound(player_id))?;
        let tile = self
            .tiles
            .get(tile_id)
            .await?
            .ok_or(ExecuteActionError::TileNotFound(tile_id))?;

        if let Err(reason) = action.check(&player) {
            tracing::info!(
                player_id = %player_id,
                action = %action,
                reason = %reason,
                "Action rejected"
            );
            return Ok(ActionOutcome::failure(reason.to_string()));
        }

        let rule = rule_for(action);
        player.stamina_mut().damage(rule.stamina_cost);
        player.stamina_mut().heal(rule.stamina_restore);
        player.hp_mut().heal(rule.hp_restore);

        let hazard = if rule.hazardous {
            hazard_for(tile.difficulty())
                .map(|range| self.random.gen_range(range.min, range.max))
                .unwrap_or(0)
        } else {
            0
        };
        let taken = player.hp_mut().damage(hazard);

        player.add_xp(rule.xp);
        player.add_ryo(rule.ryo);
        player.move_to(tile_id);

        if rule.discovers_tile {
            self.tiles.discover(tile_id, player_id).await?;
        }
        self.players.save(&player).await?;

        let place = tile.name().unwrap_or("this area").to_string();
        let message = match action {
            TileAction::Scout => format!("You scout {} and map the surroundings.", place),
            TileAction::Forage if taken > 0 => format!(
                "You forage {} and gather {}, but take {} damage.",
                place,
                rule.items.join(", "),
                taken
            ),
            TileAction::Forage => {
                format!("You forage {} and gather {}.", place, rule.items.join(", "))
            }
            TileAction::Rest => format!("You rest at {} and recover your strength.", place),
        };

        let rewards = Rewards {
            xp: (rule.xp > 0).then_some(rule.xp),
            ryo: (rule.ryo > 0).then_some(rule.ryo),
            items: (!rule.items.is_empty())
                .then(|| rule.items.iter().map(|i| i.to_string()).collect()),
        };
        let outcome = ActionOutcome::success(message)
            .with_rewards(rewards)
            .with_damage(taken)
            .with_new_stats(StatsUpdate {
                hp: Some(player.hp().current()),
                stamina: Some(player.stamina().current()),
                ryo: Some(player.ryo()),
            });

        let event = ActionEvent {
            id: EventId::from_uuid(self.random.gen_uuid()),
            player_id,
            tile_id,
            action,
            outcome: outcome.clone(),
            occurred_at: self.clock.now(),
        };
        self.events.append(&event).await?;

        tracing::info!(
            player_id = %player_id,
            tile_id = %tile_id,
            action = %action,
            damage = taken,
            "Action resolved"
        );
        Ok(outcome)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecuteActionError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Tile not found: {0}")]
    TileNotFound(TileId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use twelveninja_domain::{AxialCoord, Player, ResourcePool, Tile};

    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{
        MockClockPort, MockEventLogRepo, MockPlayerRepo, MockTileRepo,
    };

    fn player(hp: i32, stamina: i32, ryo: i64) -> Player {
        Player::new(PlayerId::new(), "kaito").unwrap().with_resources(
            ResourcePool::new(hp, 100),
            ResourcePool::new(stamina, 50),
            ryo,
        )
    }

    fn tile(difficulty: &str) -> Tile {
        Tile::new(AxialCoord::new(1, -1), "crag")
            .with_metadata("name", json!("The Obsidian Crag"))
            .with_metadata("difficulty", json!(difficulty))
    }

    fn use_case(
        players: MockPlayerRepo,
        tiles: MockTileRepo,
        events: MockEventLogRepo,
        roll: i32,
    ) -> ExecuteAction {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ExecuteAction::new(
            Arc::new(players),
            Arc::new(tiles),
            Arc::new(events),
            Arc::new(FixedClock(now)),
            Arc::new(FixedRandom::new(roll)),
        )
    }

    fn players_returning(p: Player) -> MockPlayerRepo {
        let mut players = MockPlayerRepo::new();
        players.expect_get().returning(move |_| Ok(Some(p.clone())));
        players
    }

    fn tiles_returning(t: Tile) -> MockTileRepo {
        let mut tiles = MockTileRepo::new();
        tiles.expect_get().returning(move |_| Ok(Some(t.clone())));
        tiles
    }

    #[tokio::test]
    async fn forage_without_stamina_fails_and_writes_nothing() {
        let p = player(80, 9, 10);
        let t = tile("Easy");
        let (pid, tid) = (p.id(), t.id());

        let mut players = players_returning(p);
        players.expect_save().times(0);
        let mut tiles = tiles_returning(t);
        tiles.expect_save().times(0);
        tiles.expect_discover().times(0);
        let mut events = MockEventLogRepo::new();
        events.expect_append().times(0);

        let outcome = use_case(players, tiles, events, 0)
            .execute(pid, TileAction::Forage, tid)
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Not enough stamina: need 10, have 9");
        assert!(outcome.new_stats.is_none());
    }

    #[tokio::test]
    async fn scout_discovers_tile_and_reports_authoritative_stats() {
        let p = player(80, 30, 10);
        let t = tile("Hard");
        let (pid, tid) = (p.id(), t.id());

        let mut players = players_returning(p);
        players
            .expect_save()
            .withf(move |saved| {
                saved.stamina().current() == 25
                    && saved.ryo() == 35
                    && saved.xp() == 50
                    && saved.current_tile_id() == Some(tid)
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut tiles = tiles_returning(t);
        tiles
            .expect_discover()
            .withf(move |id, by| *id == tid && *by == pid)
            .times(1)
            .returning(|_, _| Ok(true));
        tiles.expect_save().times(0);
        let mut events = MockEventLogRepo::new();
        events
            .expect_append()
            .withf(move |e| e.player_id == pid && e.action == TileAction::Scout)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = use_case(players, tiles, events, 0)
            .execute(pid, TileAction::Scout, tid)
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "You scout The Obsidian Crag and map the surroundings.");
        let rewards = outcome.rewards.unwrap();
        assert_eq!((rewards.xp, rewards.ryo), (Some(50), Some(25)));
        assert!(rewards.items.is_none());
        assert_eq!(
            outcome.new_stats,
            Some(StatsUpdate {
                hp: Some(80),
                stamina: Some(25),
                ryo: Some(35),
            })
        );
    }

    #[tokio::test]
    async fn forage_on_hard_tile_hurts() {
        let p = player(80, 30, 0);
        let t = tile("Hard");
        let (pid, tid) = (p.id(), t.id());

        let mut players = players_returning(p);
        players.expect_save().returning(|_| Ok(()));
        let tiles = tiles_returning(t);
        let mut events = MockEventLogRepo::new();
        events.expect_append().returning(|_| Ok(()));

        let outcome = use_case(players, tiles, events, 4)
            .execute(pid, TileAction::Forage, tid)
            .await
            .unwrap();
        assert_eq!(outcome.damage, Some(4));
        let stats = outcome.new_stats.unwrap();
        assert_eq!(stats.hp, Some(76));
        assert_eq!(stats.stamina, Some(20));
        assert_eq!(
            outcome.rewards.unwrap().items,
            Some(vec!["Common Herb".to_string(), "Wood".to_string()])
        );
    }

    #[tokio::test]
    async fn rest_clamps_at_max() {
        let p = player(95, 45, 0);
        let t = tile("Easy");
        let (pid, tid) = (p.id(), t.id());

        let mut players = players_returning(p);
        players.expect_save().returning(|_| Ok(()));
        let mut events = MockEventLogRepo::new();
        events.expect_append().returning(|_| Ok(()));

        let outcome = use_case(players, tiles_returning(t), events, 0)
            .execute(pid, TileAction::Rest, tid)
            .await
            .unwrap();
        let stats = outcome.new_stats.unwrap();
        assert_eq!((stats.hp, stats.stamina), (Some(100), Some(50)));
        assert!(outcome.damage.is_none());
    }

    #[tokio::test]
    async fn logged_event_is_stamped_once_by_the_clock() {
        let p = player(100, 50, 0);
        let t = tile("Easy");
        let (pid, tid) = (p.id(), t.id());
        let at = Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap();

        let mut players = players_returning(p);
        players.expect_save().returning(|_| Ok(()));
        let mut clock = MockClockPort::new();
        clock.expect_now().times(1).returning(move || at);
        let mut events = MockEventLogRepo::new();
        events
            .expect_append()
            .withf(move |e| e.occurred_at == at && e.tile_id == tid)
            .times(1)
            .returning(|_| Ok(()));

        let action = ExecuteAction::new(
            Arc::new(players),
            Arc::new(tiles_returning(t)),
            Arc::new(events),
            Arc::new(clock),
            Arc::new(FixedRandom::new(0)),
        );
        let outcome = action.execute(pid, TileAction::Rest, tid).await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let mut players = MockPlayerRepo::new();
        players.expect_get().returning(|_| Ok(None));
        let err = use_case(players, MockTileRepo::new(), MockEventLogRepo::new(), 0)
            .execute(PlayerId::new(), TileAction::Rest, TileId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecuteActionError::PlayerNotFound(_)));
    }

    mod concurrent {
        use async_trait::async_trait;

        use super::*;
        use crate::infrastructure::memory::{InMemoryEventLog, InMemoryPlayerRepo, InMemoryTileRepo};

        /// Gives the scheduler a turn before reads and discoveries so overlapping
        /// requests interleave.
        struct Yielding<R>(R);

        #[async_trait]
        impl PlayerRepo for Yielding<InMemoryPlayerRepo> {
            async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
                tokio::task::yield_now().await;
                self.0.get(id).await
            }

            async fn create(&self, player: &Player) -> Result<(), RepoError> {
                self.0.create(player).await
            }

            async fn save(&self, player: &Player) -> Result<(), RepoError> {
                self.0.save(player).await
            }
        }

        #[async_trait]
        impl TileRepo for Yielding<InMemoryTileRepo> {
            async fn get(&self, id: TileId) -> Result<Option<Tile>, RepoError> {
                tokio::task::yield_now().await;
                self.0.get(id).await
            }

            async fn get_at(&self, coord: AxialCoord) -> Result<Option<Tile>, RepoError> {
                self.0.get_at(coord).await
            }

            async fn list_in_bounds(
                &self,
                bounds: twelveninja_domain::AxialBounds,
            ) -> Result<Vec<Tile>, RepoError> {
                self.0.list_in_bounds(bounds).await
            }

            async fn save(&self, tile: &Tile) -> Result<(), RepoError> {
                self.0.save(tile).await
            }

            async fn discover(&self, id: TileId, player_id: PlayerId) -> Result<bool, RepoError> {
                tokio::task::yield_now().await;
                self.0.discover(id, player_id).await
            }
        }

        struct World {
            players: Arc<Yielding<InMemoryPlayerRepo>>,
            tiles: Arc<Yielding<InMemoryTileRepo>>,
            events: Arc<InMemoryEventLog>,
            action: ExecuteAction,
        }

        async fn world(tile: &Tile, players: &[Player]) -> World {
            let player_repo = Arc::new(Yielding(InMemoryPlayerRepo::new()));
            for p in players {
                player_repo.create(p).await.unwrap();
            }
            let tiles = Arc::new(Yielding(InMemoryTileRepo::seeded([tile.clone()]).unwrap()));
            let events = Arc::new(InMemoryEventLog::new());
            let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
            let action = ExecuteAction::new(
                player_repo.clone(),
                tiles.clone(),
                events.clone(),
                Arc::new(FixedClock(now)),
                Arc::new(FixedRandom::new(0)),
            );
            World {
                players: player_repo,
                tiles,
                events,
                action,
            }
        }

        #[tokio::test]
        async fn overlapping_actions_for_one_player_both_apply() {
            let p = player(100, 50, 0);
            let t = tile("Easy");
            let (pid, tid) = (p.id(), t.id());
            let w = world(&t, &[p]).await;

            let (first, second) = tokio::join!(
                w.action.execute(pid, TileAction::Forage, tid),
                w.action.execute(pid, TileAction::Forage, tid),
            );
            let (first, second) = (first.unwrap(), second.unwrap());
            assert!(first.success && second.success);

            let stored = w.players.get(pid).await.unwrap().unwrap();
            assert_eq!(stored.stamina().current(), 30);
            assert_eq!(stored.ryo(), 30);
            assert_eq!(stored.xp(), 60);

            let mut reported: Vec<_> = [first, second]
                .iter()
                .map(|o| o.new_stats.as_ref().and_then(|s| s.stamina))
                .collect();
            reported.sort();
            assert_eq!(reported, vec![Some(30), Some(40)]);
            assert_eq!(w.events.list_for_player(pid).await.unwrap().len(), 2);
        }

        #[tokio::test]
        async fn overlapping_scouts_of_one_tile_keep_both_discoveries() {
            let kaito = player(100, 50, 0);
            let sora = Player::new(PlayerId::new(), "sora").unwrap();
            let t = tile("Easy");
            let (kid, sid, tid) = (kaito.id(), sora.id(), t.id());
            let w = world(&t, &[kaito, sora]).await;

            let (first, second) = tokio::join!(
                w.action.execute(kid, TileAction::Scout, tid),
                w.action.execute(sid, TileAction::Scout, tid),
            );
            assert!(first.unwrap().success && second.unwrap().success);

            let stored = w.tiles.get(tid).await.unwrap().unwrap();
            assert_eq!(stored.discovered_by().len(), 2);
            assert!(stored.is_discovered_by(kid) && stored.is_discovered_by(sid));
        }
    }
}
