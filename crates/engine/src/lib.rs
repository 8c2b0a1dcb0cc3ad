//! Twelve Ninja Engine library.
//!
//! Backend collaborator for the player client: tile bounds queries, action
//! resolution and player records.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration
//! - `infrastructure/` - Port traits and their in-memory adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
