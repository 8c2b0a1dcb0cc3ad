//! Infrastructure adapters for the player client

pub mod http_client;
pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use http_client::HttpGameApi;
pub use platform::{SystemRandomProvider, SystemTimeProvider};
