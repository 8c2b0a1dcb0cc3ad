//! reqwest client for the engine's HTTP API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use twelveninja_domain::{ActionOutcome, PlayerId};
use twelveninja_shared::{
    AckResponse, CreatePlayerRequest, ExecuteActionRequest, PlayerData, TileBoundsRequest,
    TileBoundsResponse, TileData,
};

use crate::ports::outbound::{ApiError, GameApiPort};

/// Default engine base URL.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpGameApi {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_URL)
    }
}

#[async_trait]
impl GameApiPort for HttpGameApi {
    async fn query_tiles(&self, request: TileBoundsRequest) -> Result<Vec<TileData>, ApiError> {
        let response = self
            .client
            .post(self.url("/api/tiles/bounds"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        // The tile endpoint answers `{ok: false, error}` on every failure
        // status, so decode the envelope before looking at the status.
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        match serde_json::from_str::<TileBoundsResponse>(&text) {
            Ok(body) => body
                .into_result()
                .map_err(|e| ApiError::server(status.as_u16(), e.to_string())),
            Err(_) if !status.is_success() => {
                Err(ApiError::server(status.as_u16(), failure_message(&text)))
            }
            Err(e) => Err(ApiError::InvalidResponse(e.to_string())),
        }
    }

    async fn execute_action(
        &self,
        request: ExecuteActionRequest,
    ) -> Result<ActionOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/api/actions/execute"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }

    async fn fetch_player(&self, player_id: PlayerId) -> Result<PlayerData, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/players/{}", player_id)))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }

    async fn create_player(&self, username: String) -> Result<PlayerData, ApiError> {
        let response = self
            .client
            .post(self.url("/api/players"))
            .json(&CreatePlayerRequest { username })
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }
}

/// Decode a success body, or turn a failure status into `ApiError::Server`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let error_text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        return Err(ApiError::server(status, failure_message(&error_text)));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Human-readable message from an error body: the `error` field of an
/// `{ok: false, error}` envelope, else the raw text.
fn failure_message(text: &str) -> String {
    match serde_json::from_str::<AckResponse>(text) {
        Ok(AckResponse {
            error: Some(error), ..
        }) => error,
        _ if text.trim().is_empty() => "Empty response from server".to_string(),
        _ => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = HttpGameApi::new("http://engine.local:3000/");
        assert_eq!(api.base_url(), "http://engine.local:3000");
        assert_eq!(api.url("/api/health"), "http://engine.local:3000/api/health");
    }

    #[test]
    fn failure_message_prefers_envelope_error() {
        assert_eq!(
            failure_message(r#"{"ok":false,"error":"Player not found: abc"}"#),
            "Player not found: abc"
        );
        assert_eq!(failure_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(failure_message(""), "Empty response from server");
    }
}
