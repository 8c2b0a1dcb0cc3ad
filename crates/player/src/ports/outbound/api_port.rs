//! Engine API port

use async_trait::async_trait;
use twelveninja_domain::{ActionOutcome, PlayerId};
use twelveninja_shared::{ExecuteActionRequest, PlayerData, TileBoundsRequest, TileData};

/// Failure talking to the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, DNS).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The engine answered with a failure.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The engine answered but the body was not what we expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }
}

/// Typed access to the engine's HTTP surface.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait GameApiPort: Send + Sync {
    /// Tiles inside the request bounds, ordered by (r, q).
    async fn query_tiles(&self, request: TileBoundsRequest) -> Result<Vec<TileData>, ApiError>;

    /// Resolve a map action. A rejected precondition comes back as
    /// `Ok(outcome)` with `success == false`.
    async fn execute_action(
        &self,
        request: ExecuteActionRequest,
    ) -> Result<ActionOutcome, ApiError>;

    async fn fetch_player(&self, player_id: PlayerId) -> Result<PlayerData, ApiError>;

    async fn create_player(&self, username: String) -> Result<PlayerData, ApiError>;
}
