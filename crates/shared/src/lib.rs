//! Twelve Ninja Protocol - JSON shapes exchanged between engine and player
//!
//! Field changes are additive only: new fields get `#[serde(default)]`,
//! existing fields are never renamed or removed. Ids travel as raw
//! `uuid::Uuid` (or strings where validation must happen server-side) and
//! are converted to domain ids at the edges.

pub mod actions;
pub mod error;
pub mod players;
pub mod tiles;

pub use actions::{ActionOutcome, ExecuteActionRequest, Rewards, StatsUpdate, ValidatedAction};
pub use error::ProtocolError;
pub use players::{AckResponse, CreatePlayerRequest, PlayerData};
pub use tiles::{TileBoundsRequest, TileBoundsResponse, TileData, SERVER_DEFAULT_EXTENT};
