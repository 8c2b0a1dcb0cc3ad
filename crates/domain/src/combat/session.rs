//! Turn-based encounter state machine.
//!
//! Randomness and time are injected: every operation that rolls takes a
//! `roll(min, max)` closure returning an integer in `min..=max`, and every
//! operation that logs takes the current time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{CombatMessage, MessageKind, SYSTEM_ACTOR};
use crate::actions::CombatAction;
use crate::value_objects::ResourcePool;
use crate::DomainError;

/// Inclusive damage/heal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRange {
    pub min: i32,
    pub max: i32,
}

impl RollRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn roll(&self, roll: &mut impl FnMut(i32, i32) -> i32) -> i32 {
        roll(self.min, self.max).clamp(self.min, self.max)
    }
}

pub const ATTACK_DAMAGE: RollRange = RollRange::new(5, 19);
pub const ENEMY_DAMAGE: RollRange = RollRange::new(3, 10);
pub const ABILITY_DAMAGE: RollRange = RollRange::new(10, 24);
pub const ITEM_HEAL: RollRange = RollRange::new(5, 12);
pub const ABILITY_STAMINA_COST: i32 = 10;

pub const DEFAULT_ENEMY_NAME: &str = "Goblin";
pub const DEFAULT_ENEMY_HP: i32 = 30;
pub const DEFAULT_ENEMY_MAX_HP: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatResult {
    Victory,
    Defeat,
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Resolved(CombatResult),
}

impl CombatPhase {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::PlayerTurn => "player turn",
            Self::EnemyTurn => "enemy turn",
            Self::Resolved(_) => "resolved",
        }
    }
}

/// Either side of an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    hp: ResourcePool,
    stamina: ResourcePool,
}

impl Combatant {
    pub fn new(name: impl Into<String>, hp: ResourcePool, stamina: ResourcePool) -> Self {
        Self {
            name: name.into(),
            hp,
            stamina,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> ResourcePool {
        self.hp
    }

    pub fn stamina(&self) -> ResourcePool {
        self.stamina
    }
}

/// A single encounter between the player and one enemy.
///
/// The player's pools are a copy taken at construction; the session never
/// writes them back to the player record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSession {
    player: Combatant,
    enemy: Combatant,
    phase: CombatPhase,
    log: Vec<CombatMessage>,
    defending: bool,
}

impl CombatSession {
    pub fn new(player: Combatant) -> Self {
        Self {
            player,
            enemy: Combatant::new("", ResourcePool::full(0), ResourcePool::full(0)),
            phase: CombatPhase::NotStarted,
            log: Vec::new(),
            defending: false,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn log(&self) -> &[CombatMessage] {
        &self.log
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == CombatPhase::PlayerTurn
    }

    pub fn result(&self) -> Option<CombatResult> {
        match self.phase {
            CombatPhase::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Inputs that are legal right now. Empty outside the player's turn.
    pub fn available_actions(&self) -> Vec<CombatAction> {
        if !self.is_player_turn() {
            return Vec::new();
        }
        CombatAction::ALL
            .into_iter()
            .filter(|action| {
                *action != CombatAction::Ability
                    || self.player.stamina.can_afford(ABILITY_STAMINA_COST)
            })
            .collect()
    }

    /// Begin the encounter. Returns the messages appended.
    pub fn start(
        &mut self,
        enemy_name: impl Into<String>,
        enemy_hp: i32,
        enemy_max_hp: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<CombatMessage>, DomainError> {
        self.require(CombatPhase::NotStarted, "start")?;
        let enemy_name = enemy_name.into();
        if enemy_name.trim().is_empty() {
            return Err(DomainError::validation("Enemy name cannot be empty"));
        }
        if enemy_hp <= 0 {
            return Err(DomainError::validation("Enemy must start with hp above zero"));
        }
        self.enemy = Combatant::new(
            enemy_name,
            ResourcePool::new(enemy_hp, enemy_max_hp),
            ResourcePool::full(0),
        );
        self.phase = CombatPhase::PlayerTurn;

        let mark = self.log.len();
        let announce = format!("A wild {} appears!", self.enemy.name);
        self.push(MessageKind::Status, SYSTEM_ACTOR, announce, now);
        Ok(self.log[mark..].to_vec())
    }

    /// Resolve one player input and hand the turn to the enemy, or end the
    /// encounter if the enemy fell.
    pub fn submit_player_action(
        &mut self,
        action: CombatAction,
        roll: &mut impl FnMut(i32, i32) -> i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<CombatMessage>, DomainError> {
        self.require(CombatPhase::PlayerTurn, action.as_str())?;
        if action == CombatAction::Ability {
            self.player.stamina.spend("stamina", ABILITY_STAMINA_COST)?;
        }

        let mark = self.log.len();
        let actor = self.player.name.clone();
        match action {
            CombatAction::Attack => {
                self.push(MessageKind::Action, &actor, "You strike with your blade!", now);
                let dealt = self.enemy.hp.damage(ATTACK_DAMAGE.roll(roll));
                let text = format!("You deal {} damage to the {}.", dealt, self.enemy.name);
                self.push(MessageKind::Damage, &actor, text, now);
            }
            CombatAction::Defend => {
                self.defending = true;
                self.push(MessageKind::Action, &actor, "You take a defensive stance.", now);
            }
            CombatAction::Ability => {
                self.push(MessageKind::Action, &actor, "You channel your energy...", now);
                let dealt = self.enemy.hp.damage(ABILITY_DAMAGE.roll(roll));
                let text = format!("A burst of chakra hits the {} for {} damage!", self.enemy.name, dealt);
                self.push(MessageKind::Damage, &actor, text, now);
            }
            CombatAction::Item => {
                self.push(
                    MessageKind::Action,
                    &actor,
                    "You use an item from your inventory.",
                    now,
                );
                let healed = self.player.hp.heal(ITEM_HEAL.roll(roll));
                self.push(MessageKind::Heal, &actor, format!("You recover {} HP.", healed), now);
            }
        }

        if self.enemy.hp.is_empty() {
            self.resolve(CombatResult::Victory, now);
        } else {
            self.phase = CombatPhase::EnemyTurn;
        }
        Ok(self.log[mark..].to_vec())
    }

    /// The enemy's automatic reply. A pending defend halves the hit.
    pub fn resolve_enemy_turn(
        &mut self,
        roll: &mut impl FnMut(i32, i32) -> i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<CombatMessage>, DomainError> {
        self.require(CombatPhase::EnemyTurn, "enemy turn")?;

        let mark = self.log.len();
        let mut hit = ENEMY_DAMAGE.roll(roll);
        if std::mem::take(&mut self.defending) {
            hit /= 2;
        }
        let taken = self.player.hp.damage(hit);
        let actor = self.enemy.name.clone();
        self.push(
            MessageKind::Damage,
            &actor,
            format!("attacks you for {} damage!", taken),
            now,
        );

        if self.player.hp.is_empty() {
            self.resolve(CombatResult::Defeat, now);
        } else {
            self.phase = CombatPhase::PlayerTurn;
        }
        Ok(self.log[mark..].to_vec())
    }

    /// Leave the encounter. Legal in every phase except `Resolved`.
    pub fn flee(&mut self, now: DateTime<Utc>) -> Result<Vec<CombatMessage>, DomainError> {
        if self.phase.is_resolved() {
            return Err(DomainError::invalid_state_transition(
                "cannot flee: combat already resolved",
            ));
        }
        let mark = self.log.len();
        self.resolve(CombatResult::Fled, now);
        Ok(self.log[mark..].to_vec())
    }

    fn resolve(&mut self, result: CombatResult, now: DateTime<Utc>) {
        self.phase = CombatPhase::Resolved(result);
        self.defending = false;
        let text = match result {
            CombatResult::Victory => format!("You defeated the {}!", self.enemy.name),
            CombatResult::Defeat => format!("You were defeated by the {}.", self.enemy.name),
            CombatResult::Fled => "You fled from battle.".to_string(),
        };
        self.push(MessageKind::Result, SYSTEM_ACTOR, text, now);
    }

    fn require(&self, expected: CombatPhase, operation: &str) -> Result<(), DomainError> {
        if self.phase != expected {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot {} during {}",
                operation,
                self.phase.name()
            )));
        }
        Ok(())
    }

    fn push(
        &mut self,
        kind: MessageKind,
        actor: &str,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.log.push(CombatMessage::new(kind, actor, message, now));
    }
}
