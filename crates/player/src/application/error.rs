//! Client-side error taxonomy
//!
//! Every failure a service can report maps onto one of these variants, and
//! each variant has a message fit for direct display.

use thiserror::Error;
use twelveninja_domain::DomainError;
use twelveninja_shared::ProtocolError;

use crate::ports::outbound::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Bad input caught before any request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The engine could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The engine reported a fault or answered with garbage.
    #[error("Server error: {0}")]
    Server(String),

    #[error("Not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: &'static str,
        required: i32,
        available: i32,
    },

    #[error("Another action is still in progress")]
    ActionInFlight,

    #[error("No player is loaded")]
    NoActivePlayer,

    /// A combat input that is not legal in the current phase.
    #[error("Combat action unavailable: {0}")]
    CombatUnavailable(String),
}

impl GameError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Display string for the UI.
    pub fn user_message(&self) -> String {
        match self {
            GameError::Validation(msg) => msg.clone(),
            GameError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            GameError::Server(_) => {
                "The server could not complete the request. Please try again.".to_string()
            }
            GameError::InsufficientResource { .. } => self.to_string(),
            GameError::ActionInFlight => "Please wait for the current action to finish.".to_string(),
            GameError::NoActivePlayer => "No player loaded. Please sign in again.".to_string(),
            GameError::CombatUnavailable(_) => "You can't do that right now.".to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Network(_) | GameError::Server(_))
    }
}

impl From<ApiError> for GameError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestFailed(msg) => GameError::Network(msg),
            ApiError::Server { status, message } => {
                GameError::Server(format!("{} ({})", message, status))
            }
            ApiError::InvalidResponse(msg) => GameError::Server(msg),
        }
    }
}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InsufficientResource {
                resource,
                required,
                available,
            } => GameError::InsufficientResource {
                resource,
                required,
                available,
            },
            DomainError::InvalidStateTransition(msg) => GameError::CombatUnavailable(msg),
            other => GameError::Validation(other.to_string()),
        }
    }
}

impl From<ProtocolError> for GameError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Invalid(msg) => GameError::Validation(msg),
            ProtocolError::Rejected(msg) | ProtocolError::Malformed(msg) => GameError::Server(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_and_server_faults_retry() {
        assert!(GameError::Network("timeout".into()).is_retryable());
        assert!(GameError::Server("500".into()).is_retryable());
        assert!(!GameError::validation("missing player id").is_retryable());
        assert!(!GameError::ActionInFlight.is_retryable());
        assert!(!GameError::from(DomainError::insufficient("stamina", 10, 4)).is_retryable());
    }

    #[test]
    fn api_errors_map_onto_network_and_server() {
        assert!(matches!(
            GameError::from(ApiError::RequestFailed("connection refused".into())),
            GameError::Network(_)
        ));
        assert!(matches!(
            GameError::from(ApiError::server(500, "Internal error")),
            GameError::Server(_)
        ));
        assert!(matches!(
            GameError::from(ApiError::InvalidResponse("eof".into())),
            GameError::Server(_)
        ));
    }

    #[test]
    fn domain_errors_keep_their_meaning() {
        let err = GameError::from(DomainError::insufficient("stamina", 10, 9));
        assert_eq!(err.user_message(), "Not enough stamina: need 10, have 9");

        let err = GameError::from(DomainError::invalid_state_transition("not your turn"));
        assert!(matches!(err, GameError::CombatUnavailable(_)));

        let err = GameError::from(DomainError::invalid_id("malformed tile id"));
        assert!(matches!(err, GameError::Validation(_)));
    }

    #[test]
    fn server_faults_show_a_generic_message() {
        let err = GameError::from(ApiError::server(500, "storage unavailable"));
        assert_eq!(err.user_message(), "The server could not complete the request. Please try again.");
        assert!(!err.user_message().contains("action"));
        assert!(!err.user_message().contains("storage"));
    }
}
