//! Twelve Ninja Player - client core
//!
//! Everything a map/combat UI needs short of drawing: a fogged tile store,
//! the action resolver and player state, the real-time combat loop and the
//! viewport projection. The engine is reached through [`ports::outbound::GameApiPort`].

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;

pub use application::services::{
    ActionResolver, CombatEngine, CombatEvent, GameSession, PlayerState, TileSnapshot, TileStore,
    ViewportService,
};
pub use application::GameError;
pub use config::PlayerConfig;
