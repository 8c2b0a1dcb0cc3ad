//! Infrastructure implementations.
//!
//! Contains port trait implementations for storage, time and randomness.

pub mod clock;
pub mod memory;
pub mod ports;
pub mod world;
