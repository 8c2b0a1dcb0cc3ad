//! Test doubles shared by the service tests.

pub mod fixtures;

pub use fixtures::*;
