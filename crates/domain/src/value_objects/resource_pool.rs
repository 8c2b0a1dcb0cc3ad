//! Bounded resource pool (HP, stamina)

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A `current / max` pair that always satisfies `0 <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePool {
    current: i32,
    max: i32,
}

impl ResourcePool {
    /// Build a pool, clamping `current` into `[0, max]`. A negative max is treated as zero.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Remove up to `amount`; returns how much was actually removed.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount.max(0)).clamp(0, self.max);
        before - self.current
    }

    /// Restore up to `amount`; returns how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount.max(0)).clamp(0, self.max);
        self.current - before
    }

    /// Overwrite the current value with an authoritative one, clamped.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Deduct a cost, failing without change when the pool cannot cover it.
    pub fn spend(&mut self, resource: &'static str, cost: i32) -> Result<(), DomainError> {
        if self.current < cost {
            return Err(DomainError::insufficient(resource, cost, self.current));
        }
        self.current -= cost.max(0);
        Ok(())
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.current >= cost
    }
}
