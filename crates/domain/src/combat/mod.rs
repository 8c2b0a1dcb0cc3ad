//! Encounter resolution

mod message;
mod session;

pub use message::{CombatMessage, MessageKind, SYSTEM_ACTOR};
pub use session::{
    CombatPhase, CombatResult, CombatSession, Combatant, RollRange, ABILITY_DAMAGE,
    ABILITY_STAMINA_COST, ATTACK_DAMAGE, DEFAULT_ENEMY_HP, DEFAULT_ENEMY_MAX_HP,
    DEFAULT_ENEMY_NAME, ENEMY_DAMAGE, ITEM_HEAL,
};
