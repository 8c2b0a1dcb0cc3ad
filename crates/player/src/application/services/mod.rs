//! Client services

pub mod action_resolver;
pub mod combat_engine;
pub mod game_session;
pub mod player_state;
pub mod tile_store;
pub mod viewport_service;

pub use action_resolver::{parse_action_target, ActionResolver};
pub use combat_engine::{CombatEngine, CombatEvent, DEFAULT_ENEMY_TURN_DELAY};
pub use game_session::GameSession;
pub use player_state::PlayerState;
pub use tile_store::{TileSnapshot, TileStore};
pub use viewport_service::ViewportService;
