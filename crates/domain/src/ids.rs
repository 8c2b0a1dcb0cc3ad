use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }

            /// Parse an id received as text (request parameters, wire payloads).
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($label, " is missing")));
                }
                Uuid::parse_str(trimmed).map(Self).map_err(|_| {
                    DomainError::invalid_id(format!(concat!("malformed ", $label, ": '{}'"), trimmed))
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(PlayerId, "player id");
define_id!(TileId, "tile id");
define_id!(CombatMessageId, "combat message id");
define_id!(EventId, "event id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_uuid_text() {
        let id = PlayerId::new();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_empty_and_malformed() {
        assert!(matches!(TileId::parse("  "), Err(DomainError::InvalidId(_))));
        let err = TileId::parse("tile-7").unwrap_err();
        assert!(err.to_string().contains("malformed tile id"));
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&TileId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
