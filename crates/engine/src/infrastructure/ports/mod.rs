//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Storage of tiles, players and the action event log (in-memory today)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{ActionEvent, EventLogRepo, PlayerRepo, TileRepo};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::{MockEventLogRepo, MockPlayerRepo, MockTileRepo};
#[cfg(test)]
pub use testing::MockClockPort;
