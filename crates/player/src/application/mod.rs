//! Application layer - client-side services over the outbound ports

pub mod error;
pub mod services;

pub use error::GameError;
