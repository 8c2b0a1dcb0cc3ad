//! Engine configuration from environment variables.

use std::net::SocketAddr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WORLD_RADIUS: u16 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Hex radius of the generated world around the origin.
    pub world_radius: u16,
    /// Fixed seed for reproducible worlds; random when unset.
    pub world_seed: Option<u64>,
    /// Comma-separated origins, or `*`. No CORS layer when unset.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            world_radius: DEFAULT_WORLD_RADIUS,
            world_seed: None,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .map(|raw| parse_or("SERVER_PORT", &raw, DEFAULT_PORT))
            .unwrap_or(DEFAULT_PORT);
        let world_radius = lookup("WORLD_RADIUS")
            .map(|raw| parse_or("WORLD_RADIUS", &raw, DEFAULT_WORLD_RADIUS))
            .unwrap_or(DEFAULT_WORLD_RADIUS);
        let world_seed = lookup("WORLD_SEED").and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(value = %raw, "Ignoring invalid WORLD_SEED");
                None
            }
        });

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            server_host,
            server_port,
            world_radius,
            world_seed,
            cors_allowed_origins,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, default = %default, "Invalid value, using default");
        default
    })
}
