//! Clock and random implementations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - thread-local RNG.
#[derive(Debug, Default)]
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing: every roll returns the same value (clamped into
/// the requested range), uuids count up from 1.
#[cfg(test)]
pub struct FixedRandom {
    value: i32,
    next_uuid: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl FixedRandom {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            next_uuid: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.value.clamp(min, max.max(min))
    }

    fn gen_uuid(&self) -> Uuid {
        let n = self
            .next_uuid
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Uuid::from_u128(u128::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom;
        for _ in 0..200 {
            let roll = random.gen_range(5, 19);
            assert!((5..=19).contains(&roll));
        }
        assert_eq!(random.gen_range(7, 7), 7);
    }

    #[test]
    fn fixed_random_clamps_and_counts() {
        let random = FixedRandom::new(100);
        assert_eq!(random.gen_range(3, 10), 10);
        assert_ne!(random.gen_uuid(), random.gen_uuid());
    }
}
