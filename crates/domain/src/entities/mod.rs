//! Entities with identity and mutable state

mod player;
mod tile;

pub use player::{Player, DEFAULT_MAX_HP, DEFAULT_MAX_STAMINA};
pub use tile::{Difficulty, Tile, TileView};
