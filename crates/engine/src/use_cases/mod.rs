//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod actions;
pub mod players;
pub mod tiles;

pub use actions::ActionUseCases;
pub use players::PlayerUseCases;
pub use tiles::TileUseCases;
