//! System-backed time and randomness

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::ports::outbound::{RandomProvider, TimeProvider};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-local RNG. An inverted range yields `min`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandomProvider;

impl RandomProvider for SystemRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_range_is_inclusive_and_bounded() {
        let random = SystemRandomProvider;
        for _ in 0..200 {
            let n = random.random_range(3, 10);
            assert!((3..=10).contains(&n));
        }
        assert_eq!(random.random_range(7, 7), 7);
        assert_eq!(random.random_range(9, 2), 9);
    }
}
