//! Client configuration from environment variables.

use std::time::Duration;

use twelveninja_domain::{PlayerId, TileAction};

use crate::application::services::DEFAULT_ENEMY_TURN_DELAY;
use crate::infrastructure::http_client::{DEFAULT_ENGINE_URL, DEFAULT_REQUEST_TIMEOUT};

const DEFAULT_USERNAME: &str = "genin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub engine_url: String,
    pub request_timeout: Duration,
    pub enemy_turn_delay: Duration,
    /// Existing player to resume; a new one is created when unset.
    pub player_id: Option<PlayerId>,
    /// Username for a newly created player.
    pub username: String,
    /// Action the headless driver performs on its current tile.
    pub action: TileAction,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            enemy_turn_delay: DEFAULT_ENEMY_TURN_DELAY,
            player_id: None,
            username: DEFAULT_USERNAME.to_string(),
            action: TileAction::Scout,
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let engine_url = lookup("ENGINE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.engine_url);
        let request_timeout = lookup("REQUEST_TIMEOUT_MS")
            .map(|raw| millis_or("REQUEST_TIMEOUT_MS", &raw, defaults.request_timeout))
            .unwrap_or(defaults.request_timeout);
        let enemy_turn_delay = lookup("ENEMY_TURN_DELAY_MS")
            .map(|raw| millis_or("ENEMY_TURN_DELAY_MS", &raw, defaults.enemy_turn_delay))
            .unwrap_or(defaults.enemy_turn_delay);
        let player_id = lookup("PLAYER_ID").and_then(|raw| match PlayerId::parse(raw.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring invalid PLAYER_ID");
                None
            }
        });
        let username = lookup("PLAYER_USERNAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.username);
        let action = lookup("PLAYER_ACTION")
            .and_then(|raw| match raw.trim().parse() {
                Ok(action) => Some(action),
                Err(_) => {
                    tracing::warn!(value = %raw, "Invalid PLAYER_ACTION, using scout");
                    None
                }
            })
            .unwrap_or(defaults.action);

        Self {
            engine_url,
            request_timeout,
            enemy_turn_delay,
            player_id,
            username,
            action,
        }
    }
}

fn millis_or(key: &str, raw: &str, default: Duration) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            tracing::warn!(
                key,
                value = %raw,
                default_ms = default.as_millis() as u64,
                "Invalid value, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> PlayerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlayerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg, PlayerConfig::default());
        assert_eq!(cfg.engine_url, "http://localhost:3000");
        assert_eq!(cfg.request_timeout, Duration::from_millis(10_000));
        assert_eq!(cfg.enemy_turn_delay, Duration::from_millis(1_000));
    }

    #[test]
    fn reads_overrides() {
        let id = PlayerId::new();
        let id_text = id.to_string();
        let cfg = config(&[
            ("ENGINE_URL", "http://engine:8080/"),
            ("REQUEST_TIMEOUT_MS", "2500"),
            ("ENEMY_TURN_DELAY_MS", "0"),
            ("PLAYER_ID", id_text.as_str()),
            ("PLAYER_ACTION", "forage"),
        ]);
        assert_eq!(cfg.engine_url, "http://engine:8080/");
        assert_eq!(cfg.request_timeout, Duration::from_millis(2500));
        assert_eq!(cfg.enemy_turn_delay, Duration::ZERO);
        assert_eq!(cfg.player_id, Some(id));
        assert_eq!(cfg.action, TileAction::Forage);
    }

    #[test]
    fn invalid_values_use_defaults() {
        let cfg = config(&[
            ("REQUEST_TIMEOUT_MS", "soon"),
            ("PLAYER_ID", "not-a-uuid"),
            ("PLAYER_ACTION", "nap"),
            ("PLAYER_USERNAME", "   "),
        ]);
        assert_eq!(cfg.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(cfg.player_id, None);
        assert_eq!(cfg.action, TileAction::Scout);
        assert_eq!(cfg.username, "genin");
    }
}
