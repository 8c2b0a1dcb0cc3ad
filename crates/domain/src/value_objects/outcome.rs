//! Action outcomes as computed by the server.
//!
//! The JSON shape (`success`, `message`, `rewards`, `damage`, `newStats`) is
//! a wire contract: fields may be added, never renamed or removed.

use serde::{Deserialize, Serialize};

/// Rewards granted by a resolved action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ryo: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.xp.is_none() && self.ryo.is_none() && self.items.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Authoritative resource values after an action. Absent fields were not
/// reported by the server and must not be touched on the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamina: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ryo: Option<i64>,
}

impl StatsUpdate {
    pub fn hp(hp: i32) -> Self {
        Self {
            hp: Some(hp),
            ..Self::default()
        }
    }
}

/// Result of a single action request. Produced once, applied, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_stats: Option<StatsUpdate>,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            rewards: None,
            damage: None,
            new_stats: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = (!rewards.is_empty()).then_some(rewards);
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = (damage > 0).then_some(damage);
        self
    }

    pub fn with_new_stats(mut self, stats: StatsUpdate) -> Self {
        self.new_stats = Some(stats);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_new_stats_in_camel_case() {
        let outcome = ActionOutcome::success("ok").with_new_stats(StatsUpdate::hp(50));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["newStats"]["hp"], 50);
        assert!(json.get("rewards").is_none());
        assert!(json["newStats"].get("stamina").is_none());
    }

    #[test]
    fn tolerates_unknown_and_missing_fields() {
        let outcome: ActionOutcome = serde_json::from_str(
            r#"{"success":true,"message":"done","futureField":1,"rewards":{"xp":5}}"#,
        )
        .unwrap();
        assert_eq!(outcome.rewards.unwrap().xp, Some(5));
        assert!(outcome.new_stats.is_none());
    }

    #[test]
    fn empty_rewards_and_zero_damage_are_dropped() {
        let outcome = ActionOutcome::success("rested")
            .with_rewards(Rewards::default())
            .with_damage(0);
        assert!(outcome.rewards.is_none());
        assert!(outcome.damage.is_none());
    }
}
