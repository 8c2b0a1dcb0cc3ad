//! Closed action vocabularies for tile work and combat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::DomainError;

/// Stamina gate for a tile action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequirement {
    /// Stamina the player must hold before the request is sent.
    pub min_stamina: i32,
}

/// Work a player can do on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileAction {
    Scout,
    Forage,
    Rest,
}

impl TileAction {
    pub const ALL: [TileAction; 3] = [Self::Scout, Self::Forage, Self::Rest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Forage => "forage",
            Self::Rest => "rest",
        }
    }

    pub fn requirement(&self) -> ActionRequirement {
        let min_stamina = match self {
            Self::Scout => 0,
            Self::Forage => 10,
            Self::Rest => 0,
        };
        ActionRequirement { min_stamina }
    }

    /// Local precondition check, run before any request leaves the client.
    pub fn check(&self, player: &Player) -> Result<(), DomainError> {
        let required = self.requirement().min_stamina;
        let available = player.stamina().current();
        if available < required {
            return Err(DomainError::insufficient("stamina", required, available));
        }
        Ok(())
    }

    /// Actions the player can currently afford, in display order.
    pub fn available_for(player: &Player) -> Vec<TileAction> {
        Self::ALL
            .into_iter()
            .filter(|action| action.check(player).is_ok())
            .collect()
    }
}

impl fmt::Display for TileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scout" => Ok(Self::Scout),
            "forage" => Ok(Self::Forage),
            "rest" => Ok(Self::Rest),
            _ => Err(DomainError::validation(format!("Unknown action type: {}", s))),
        }
    }
}

/// Player inputs during an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatAction {
    Attack,
    Defend,
    Ability,
    Item,
}

impl CombatAction {
    pub const ALL: [CombatAction; 4] = [Self::Attack, Self::Defend, Self::Ability, Self::Item];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Ability => "ability",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(Self::Attack),
            "defend" => Ok(Self::Defend),
            "ability" => Ok(Self::Ability),
            "item" => Ok(Self::Item),
            _ => Err(DomainError::validation(format!("Unknown combat action: {}", s))),
        }
    }
}
