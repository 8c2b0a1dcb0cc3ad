//! Costs and rewards per tile action.

use twelveninja_domain::combat::RollRange;
use twelveninja_domain::{Difficulty, TileAction};

/// What an action costs and yields. Looked up per action, never inlined at
/// call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRule {
    pub stamina_cost: i32,
    pub stamina_restore: i32,
    pub hp_restore: i32,
    pub xp: i64,
    pub ryo: i64,
    pub items: &'static [&'static str],
    /// Marks the tile as discovered by the acting player.
    pub discovers_tile: bool,
    /// May hurt the player depending on tile difficulty.
    pub hazardous: bool,
}

pub fn rule_for(action: TileAction) -> ActionRule {
    match action {
        TileAction::Scout => ActionRule {
            stamina_cost: 5,
            stamina_restore: 0,
            hp_restore: 0,
            xp: 50,
            ryo: 25,
            items: &[],
            discovers_tile: true,
            hazardous: false,
        },
        TileAction::Forage => ActionRule {
            stamina_cost: 10,
            stamina_restore: 0,
            hp_restore: 0,
            xp: 30,
            ryo: 15,
            items: &["Common Herb", "Wood"],
            discovers_tile: false,
            hazardous: true,
        },
        TileAction::Rest => ActionRule {
            stamina_cost: 0,
            stamina_restore: 15,
            hp_restore: 10,
            xp: 10,
            ryo: 0,
            items: &[],
            discovers_tile: false,
            hazardous: false,
        },
    }
}

/// Damage range for hazardous work on a tile. Easy tiles are safe.
pub fn hazard_for(difficulty: Difficulty) -> Option<RollRange> {
    match difficulty {
        Difficulty::Easy => None,
        Difficulty::Medium => Some(RollRange::new(0, 3)),
        Difficulty::Hard => Some(RollRange::new(2, 6)),
        Difficulty::VeryHard => Some(RollRange::new(4, 10)),
    }
}
