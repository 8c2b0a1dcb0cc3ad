//! Simple test fixtures used across unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map};
use twelveninja_domain::{ActionOutcome, PlayerId, StatsUpdate, TileId};
use twelveninja_shared::{PlayerData, TileData};
use uuid::Uuid;

use crate::ports::outbound::{ApiError, RandomProvider, TimeProvider};

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn player_data(id: PlayerId, hp: i32, stamina: i32, ryo: i64) -> PlayerData {
    PlayerData {
        id: id.to_uuid(),
        username: "kaito".to_string(),
        level: 1,
        xp: 0,
        ryo,
        stamina,
        max_stamina: 50,
        hp,
        max_hp: 100,
        current_tile_id: None,
        skill_points: 0,
    }
}

pub fn tile_data(q: i32, r: i32, discovered_by: &[PlayerId]) -> TileData {
    let mut metadata = Map::new();
    metadata.insert("name".to_string(), json!(format!("Tile {},{}", q, r)));
    TileData {
        id: Uuid::new_v4(),
        q,
        r,
        tile_type: "forest".to_string(),
        owner_code: None,
        discovered_by: discovered_by.iter().map(|p| p.to_uuid()).collect(),
        // Inverted: clients must derive fog from discovered_by.
        explored: discovered_by.is_empty(),
        metadata,
    }
}

pub fn tile_id_of(data: &TileData) -> TileId {
    TileId::from_uuid(data.id)
}

pub fn successful_outcome(hp: i32, stamina: i32, ryo: i64) -> ActionOutcome {
    ActionOutcome::success("You forage the area and gather Common Herb, Wood.").with_new_stats(
        StatsUpdate {
            hp: Some(hp),
            stamina: Some(stamina),
            ryo: Some(ryo),
        },
    )
}

/// Clock frozen at [`fixed_now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenTime;

impl TimeProvider for FrozenTime {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Replays scripted rolls in order, clamped into the requested range.
/// Falls back to the range minimum once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    rolls: Mutex<VecDeque<i32>>,
}

impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into_iter().collect()),
        }
    }
}

impl RandomProvider for ScriptedRandom {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        let next = self
            .rolls
            .lock()
            .map(|mut rolls| rolls.pop_front())
            .unwrap_or(None);
        next.unwrap_or(min).clamp(min, max.max(min))
    }
}
