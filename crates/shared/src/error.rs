//! Wire-level validation failures

use thiserror::Error;
use twelveninja_domain::DomainError;

/// A request or response that cannot be turned into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("{0}")]
    Invalid(String),

    /// The peer answered with `ok: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProtocolError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<DomainError> for ProtocolError {
    fn from(err: DomainError) -> Self {
        Self::Invalid(err.to_string())
    }
}
