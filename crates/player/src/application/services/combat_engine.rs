//! Combat engine
//!
//! Drives one `CombatSession` in real time: player inputs resolve
//! immediately, the enemy answers on a timer. Every appended log line and
//! every phase change is broadcast to subscribers.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use twelveninja_domain::{
    CombatAction, CombatMessage, CombatPhase, CombatSession, Combatant, Player,
    DEFAULT_ENEMY_HP, DEFAULT_ENEMY_MAX_HP, DEFAULT_ENEMY_NAME,
};

use crate::application::GameError;
use crate::ports::outbound::{RandomProvider, TimeProvider};

/// Pause between the player's move and the enemy's reply.
pub const DEFAULT_ENEMY_TURN_DELAY: Duration = Duration::from_millis(1000);

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    Message(CombatMessage),
    PhaseChanged(CombatPhase),
}

/// Events are published while `session` is still locked, so the broadcast
/// order always matches the log order.
struct Shared {
    session: Mutex<CombatSession>,
    events: broadcast::Sender<CombatEvent>,
    clock: Arc<dyn TimeProvider>,
    random: Arc<dyn RandomProvider>,
}

impl Shared {
    fn publish(&self, before: CombatPhase, after: CombatPhase, messages: &[CombatMessage]) {
        // No subscribers is fine.
        for message in messages {
            let _ = self.events.send(CombatEvent::Message(message.clone()));
        }
        if before != after {
            let _ = self.events.send(CombatEvent::PhaseChanged(after));
        }
    }

    async fn run_enemy_turn(&self) {
        let mut session = self.session.lock().await;
        if session.phase() != CombatPhase::EnemyTurn {
            return;
        }
        let before = session.phase();
        let rolled = session.resolve_enemy_turn(
            &mut |min, max| self.random.random_range(min, max),
            self.clock.now(),
        );
        match rolled {
            Ok(messages) => {
                let after = session.phase();
                self.publish(before, after, &messages);
                drop(session);
                tracing::debug!(phase = ?after, "Enemy turn resolved");
            }
            Err(e) => tracing::warn!(error = %e, "Enemy turn skipped"),
        }
    }
}

pub struct CombatEngine {
    shared: Arc<Shared>,
    enemy_turn_delay: Duration,
    enemy_turn: StdMutex<Option<JoinHandle<()>>>,
}

impl CombatEngine {
    /// New session in `NotStarted`, using a copy of the player's pools.
    pub fn new(
        player: &Player,
        clock: Arc<dyn TimeProvider>,
        random: Arc<dyn RandomProvider>,
    ) -> Self {
        let combatant = Combatant::new(player.username(), player.hp(), player.stamina());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(CombatSession::new(combatant)),
                events,
                clock,
                random,
            }),
            enemy_turn_delay: DEFAULT_ENEMY_TURN_DELAY,
            enemy_turn: StdMutex::new(None),
        }
    }

    pub fn with_enemy_turn_delay(mut self, delay: Duration) -> Self {
        self.enemy_turn_delay = delay;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.shared.events.subscribe()
    }

    pub async fn snapshot(&self) -> CombatSession {
        self.shared.session.lock().await.clone()
    }

    pub async fn phase(&self) -> CombatPhase {
        self.shared.session.lock().await.phase()
    }

    /// Legal inputs right now; empty unless it is the player's turn.
    pub async fn available_actions(&self) -> Vec<CombatAction> {
        self.shared.session.lock().await.available_actions()
    }

    pub async fn start(
        &self,
        enemy_name: &str,
        enemy_hp: i32,
        enemy_max_hp: i32,
    ) -> Result<Vec<CombatMessage>, GameError> {
        let mut session = self.shared.session.lock().await;
        let before = session.phase();
        let messages = session.start(enemy_name, enemy_hp, enemy_max_hp, self.shared.clock.now())?;
        let after = session.phase();
        self.shared.publish(before, after, &messages);
        drop(session);

        tracing::info!(enemy = enemy_name, enemy_hp, "Combat started");
        Ok(messages)
    }

    /// Start against the stock encounter.
    pub async fn start_default(&self) -> Result<Vec<CombatMessage>, GameError> {
        self.start(DEFAULT_ENEMY_NAME, DEFAULT_ENEMY_HP, DEFAULT_ENEMY_MAX_HP)
            .await
    }

    /// Resolve a player input. If the enemy survives, its reply is
    /// scheduled after the configured delay.
    pub async fn submit(&self, action: CombatAction) -> Result<Vec<CombatMessage>, GameError> {
        let mut session = self.shared.session.lock().await;
        let before = session.phase();
        let random = &self.shared.random;
        let messages = session.submit_player_action(
            action,
            &mut |min, max| random.random_range(min, max),
            self.shared.clock.now(),
        )?;
        let after = session.phase();
        self.shared.publish(before, after, &messages);
        drop(session);

        tracing::debug!(action = %action, phase = ?after, "Combat action resolved");
        if after == CombatPhase::EnemyTurn {
            self.schedule_enemy_turn();
        }
        Ok(messages)
    }

    /// Leave the encounter, cancelling any pending enemy reply.
    pub async fn flee(&self) -> Result<Vec<CombatMessage>, GameError> {
        self.cancel_enemy_turn();

        let mut session = self.shared.session.lock().await;
        let before = session.phase();
        let messages = session.flee(self.shared.clock.now())?;
        let after = session.phase();
        self.shared.publish(before, after, &messages);
        drop(session);

        tracing::info!("Fled from combat");
        Ok(messages)
    }

    fn schedule_enemy_turn(&self) {
        let shared = Arc::clone(&self.shared);
        let delay = self.enemy_turn_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.run_enemy_turn().await;
        });
        if let Some(previous) = self.enemy_turn_slot().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_enemy_turn(&self) {
        if let Some(pending) = self.enemy_turn_slot().take() {
            pending.abort();
        }
    }

    fn enemy_turn_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.enemy_turn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CombatEngine {
    fn drop(&mut self) {
        self.cancel_enemy_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{FrozenTime, ScriptedRandom};
    use twelveninja_domain::{CombatResult, MessageKind, PlayerId, ResourcePool};

    const DELAY: Duration = DEFAULT_ENEMY_TURN_DELAY;

    fn engine(rolls: impl IntoIterator<Item = i32>) -> CombatEngine {
        let player = Player::new(PlayerId::new(), "kaito").unwrap().with_resources(
            ResourcePool::new(80, 100),
            ResourcePool::new(30, 50),
            0,
        );
        CombatEngine::new(
            &player,
            Arc::new(FrozenTime),
            Arc::new(ScriptedRandom::new(rolls)),
        )
    }

    fn past_delay() -> Duration {
        DELAY + Duration::from_millis(1)
    }

    #[tokio::test(start_paused = true)]
    async fn start_announces_the_enemy() {
        let engine = engine([]);
        assert_eq!(engine.phase().await, CombatPhase::NotStarted);

        let messages = engine.start_default().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind(), MessageKind::Status);
        assert_eq!(messages[0].message(), "A wild Goblin appears!");
        assert_eq!(engine.phase().await, CombatPhase::PlayerTurn);
        assert_eq!(engine.available_actions().await.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn enemy_replies_only_after_the_delay() {
        let engine = engine([10, 5]);
        engine.start_default().await.unwrap();

        engine.submit(CombatAction::Attack).await.unwrap();
        assert_eq!(engine.phase().await, CombatPhase::EnemyTurn);
        assert!(engine.available_actions().await.is_empty());

        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(engine.phase().await, CombatPhase::EnemyTurn);

        tokio::time::sleep(DELAY).await;
        let session = engine.snapshot().await;
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.enemy().hp().current(), 20);
        assert_eq!(session.player().hp().current(), 75);
        let last = session.log().last().unwrap();
        assert_eq!(last.actor(), "Goblin");
        assert_eq!(last.message(), "attacks you for 5 damage!");
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_turn_input_is_rejected() {
        let engine = engine([10, 5]);
        let err = engine.submit(CombatAction::Attack).await.unwrap_err();
        assert!(matches!(err, GameError::CombatUnavailable(_)));

        engine.start_default().await.unwrap();
        engine.submit(CombatAction::Defend).await.unwrap();
        let err = engine.submit(CombatAction::Attack).await.unwrap_err();
        assert!(matches!(err, GameError::CombatUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn victory_stops_the_enemy() {
        let engine = engine([19, 3, 19]);
        engine.start_default().await.unwrap();

        engine.submit(CombatAction::Attack).await.unwrap();
        tokio::time::sleep(past_delay()).await;
        engine.submit(CombatAction::Attack).await.unwrap();

        let session = engine.snapshot().await;
        assert_eq!(session.phase(), CombatPhase::Resolved(CombatResult::Victory));
        assert!(session.enemy().hp().is_empty());
        let log_len = session.log().len();

        tokio::time::sleep(DELAY * 5).await;
        let session = engine.snapshot().await;
        assert_eq!(session.log().len(), log_len);
        assert_eq!(session.player().hp().current(), 77);
        assert_eq!(session.log().last().unwrap().kind(), MessageKind::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn fleeing_cancels_the_pending_enemy_turn() {
        let engine = engine([10, 5]);
        engine.start_default().await.unwrap();
        engine.submit(CombatAction::Attack).await.unwrap();

        engine.flee().await.unwrap();
        tokio::time::sleep(DELAY * 3).await;

        let session = engine.snapshot().await;
        assert_eq!(session.phase(), CombatPhase::Resolved(CombatResult::Fled));
        assert_eq!(session.player().hp().current(), 80);
        assert!(session.log().iter().all(|m| m.actor() != "Goblin"));
        assert!(matches!(engine.flee().await, Err(GameError::CombatUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_every_append_in_order() {
        let engine = engine([10, 5]);
        let mut rx = engine.subscribe();

        engine.start_default().await.unwrap();
        engine.submit(CombatAction::Attack).await.unwrap();
        tokio::time::sleep(past_delay()).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        let phases: Vec<CombatPhase> = events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::PhaseChanged(p) => Some(*p),
                CombatEvent::Message(_) => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                CombatPhase::PlayerTurn,
                CombatPhase::EnemyTurn,
                CombatPhase::PlayerTurn
            ]
        );

        let logged: Vec<CombatMessage> = events
            .into_iter()
            .filter_map(|e| match e {
                CombatEvent::Message(m) => Some(m),
                CombatEvent::PhaseChanged(_) => None,
            })
            .collect();
        assert_eq!(logged, engine.snapshot().await.log().to_vec());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn broadcast_order_matches_the_log_with_an_immediate_enemy() {
        let engine = engine([]).with_enemy_turn_delay(Duration::ZERO);
        let mut rx = engine.subscribe();
        engine.start("Ogre", 500, 500).await.unwrap();

        for _ in 0..8 {
            while engine.phase().await != CombatPhase::PlayerTurn {
                tokio::task::yield_now().await;
            }
            engine.submit(CombatAction::Defend).await.unwrap();
        }
        while engine.phase().await != CombatPhase::PlayerTurn {
            tokio::task::yield_now().await;
        }

        let mut logged = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let CombatEvent::Message(m) = event {
                logged.push(m);
            }
        }
        assert_eq!(logged, engine.snapshot().await.log().to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_engine_cancels_the_timer() {
        let engine = engine([10, 5]);
        let mut rx = engine.subscribe();
        engine.start_default().await.unwrap();
        engine.submit(CombatAction::Attack).await.unwrap();
        drop(engine);

        tokio::time::sleep(DELAY * 3).await;
        let mut enemy_spoke = false;
        while let Ok(event) = rx.try_recv() {
            if let CombatEvent::Message(m) = event {
                enemy_spoke |= m.actor() == "Goblin";
            }
        }
        assert!(!enemy_spoke);
    }

    #[tokio::test(start_paused = true)]
    async fn ability_is_hidden_when_stamina_is_short() {
        let player = Player::new(PlayerId::new(), "kaito").unwrap().with_resources(
            ResourcePool::new(80, 100),
            ResourcePool::new(5, 50),
            0,
        );
        let engine = CombatEngine::new(&player, Arc::new(FrozenTime), Arc::new(ScriptedRandom::new([])))
            .with_enemy_turn_delay(Duration::from_millis(10));
        engine.start("Bandit", 20, 20).await.unwrap();

        let actions = engine.available_actions().await;
        assert!(!actions.contains(&CombatAction::Ability));
        assert!(matches!(
            engine.submit(CombatAction::Ability).await,
            Err(GameError::InsufficientResource { .. })
        ));
    }
}
