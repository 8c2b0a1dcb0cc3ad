//! Twelve Ninja domain: hex geometry, tiles and fog, player resources,
//! action vocabularies and the combat state machine.
//!
//! Nothing here performs I/O. Time and randomness are passed in by callers.

pub mod actions;
pub mod combat;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use actions::{ActionRequirement, CombatAction, TileAction};
pub use combat::{
    CombatMessage, CombatPhase, CombatResult, CombatSession, Combatant, MessageKind,
    DEFAULT_ENEMY_HP, DEFAULT_ENEMY_MAX_HP, DEFAULT_ENEMY_NAME,
};
pub use entities::{Difficulty, Player, Tile, TileView};
pub use error::DomainError;
pub use ids::{CombatMessageId, EventId, PlayerId, TileId};
pub use value_objects::{
    axial_to_pixel, pixel_to_axial, ActionOutcome, AxialBounds, AxialCoord, HexLayout, HexSize,
    PixelPoint, ResourcePool, Rewards, StatsUpdate, ViewportController, ViewportSize,
};
