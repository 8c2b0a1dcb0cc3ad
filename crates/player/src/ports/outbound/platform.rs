//! Platform abstraction ports
//!
//! Time and randomness sit behind traits so the combat loop can be driven
//! deterministically in tests.

use chrono::{DateTime, Utc};

/// Wall-clock time
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Random number generation
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomProvider: Send + Sync {
    /// Generate random i32 in range [min, max] (inclusive)
    fn random_range(&self, min: i32, max: i32) -> i32;
}
