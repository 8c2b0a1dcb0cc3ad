//! Combat log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CombatMessageId;

/// Actor name used for narration that belongs to no combatant.
pub const SYSTEM_ACTOR: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Action,
    Damage,
    Heal,
    Status,
    Result,
}

/// One line of the combat log. Entries are never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatMessage {
    id: CombatMessageId,
    #[serde(rename = "type")]
    kind: MessageKind,
    actor: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl CombatMessage {
    pub fn new(
        kind: MessageKind,
        actor: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CombatMessageId::new(),
            kind,
            actor: actor.into(),
            message: message.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> CombatMessageId {
        self.id
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
