//! Player resource pools and progression

use serde::{Deserialize, Serialize};

use crate::value_objects::{ResourcePool, StatsUpdate};
use crate::{DomainError, PlayerId, TileId};

pub const DEFAULT_MAX_HP: i32 = 100;
pub const DEFAULT_MAX_STAMINA: i32 = 50;

/// One player's mutable state.
///
/// HP and stamina live in [`ResourcePool`]s, so `0 <= hp <= max_hp` and
/// `0 <= stamina <= max_stamina` hold by construction; ryo never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    username: String,
    level: u32,
    xp: i64,
    ryo: i64,
    stamina: ResourcePool,
    hp: ResourcePool,
    current_tile_id: Option<TileId>,
    skill_points: u32,
}

impl Player {
    pub fn new(id: PlayerId, username: impl Into<String>) -> Result<Self, DomainError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        Ok(Self {
            id,
            username,
            level: 1,
            xp: 0,
            ryo: 0,
            stamina: ResourcePool::full(DEFAULT_MAX_STAMINA),
            hp: ResourcePool::full(DEFAULT_MAX_HP),
            current_tile_id: None,
            skill_points: 0,
        })
    }

    /// Reconstruct from stored data, clamping pools into their invariants.
    pub fn from_parts(
        id: PlayerId,
        username: String,
        level: u32,
        xp: i64,
        ryo: i64,
        stamina: ResourcePool,
        hp: ResourcePool,
        current_tile_id: Option<TileId>,
        skill_points: u32,
    ) -> Self {
        Self {
            id,
            username,
            level,
            xp,
            ryo: ryo.max(0),
            stamina,
            hp,
            current_tile_id,
            skill_points,
        }
    }

    // Read-only accessors

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> i64 {
        self.xp
    }

    pub fn ryo(&self) -> i64 {
        self.ryo
    }

    pub fn stamina(&self) -> ResourcePool {
        self.stamina
    }

    pub fn hp(&self) -> ResourcePool {
        self.hp
    }

    pub fn current_tile_id(&self) -> Option<TileId> {
        self.current_tile_id
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    // Builder-style methods

    pub fn with_resources(mut self, hp: ResourcePool, stamina: ResourcePool, ryo: i64) -> Self {
        self.hp = hp;
        self.stamina = stamina;
        self.ryo = ryo.max(0);
        self
    }

    pub fn with_current_tile(mut self, tile: Option<TileId>) -> Self {
        self.current_tile_id = tile;
        self
    }

    // Mutations

    /// Merge an authoritative stats snapshot. Only fields present in
    /// `stats` are written; everything else keeps its current value.
    pub fn merge_stats(&mut self, stats: &StatsUpdate) {
        if let Some(hp) = stats.hp {
            self.hp.set(hp);
        }
        if let Some(stamina) = stats.stamina {
            self.stamina.set(stamina);
        }
        if let Some(ryo) = stats.ryo {
            self.ryo = ryo.max(0);
        }
    }

    pub fn stamina_mut(&mut self) -> &mut ResourcePool {
        &mut self.stamina
    }

    pub fn hp_mut(&mut self) -> &mut ResourcePool {
        &mut self.hp
    }

    pub fn add_ryo(&mut self, amount: i64) {
        self.ryo = self.ryo.saturating_add(amount).max(0);
    }

    pub fn add_xp(&mut self, amount: i64) {
        self.xp = self.xp.saturating_add(amount.max(0));
    }

    pub fn move_to(&mut self, tile: TileId) {
        self.current_tile_id = Some(tile);
    }
}
