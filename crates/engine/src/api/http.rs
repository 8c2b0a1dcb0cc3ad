//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use twelveninja_domain::{ActionOutcome, PlayerId};
use twelveninja_shared::{
    AckResponse, CreatePlayerRequest, ExecuteActionRequest, PlayerData, TileBoundsRequest,
    TileBoundsResponse, TileData,
};

use crate::app::App;
use crate::infrastructure::ports::{ActionEvent, RepoError};
use crate::use_cases::actions::ExecuteActionError;
use crate::use_cases::players::{CreatePlayerError, GetPlayerError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/tiles/bounds", post(query_tiles))
        .route("/api/actions/execute", post(execute_action))
        .route("/api/players", post(create_player))
        .route("/api/players/{id}", get(get_player))
        .route("/api/players/{id}/events", get(list_player_events))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Tiles
// =============================================================================

/// Answers with `{ok, tiles}` / `{ok: false, error}` in every case so the
/// client never has to parse a second error shape.
async fn query_tiles(
    State(app): State<Arc<App>>,
    Json(request): Json<TileBoundsRequest>,
) -> (StatusCode, Json<TileBoundsResponse>) {
    let bounds = match request.bounds() {
        Ok(bounds) => bounds,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(TileBoundsResponse::failure(e.to_string())),
            )
        }
    };
    let viewer = request.viewer();

    match app.use_cases.tiles.query.execute(bounds, viewer).await {
        Ok(tiles) => {
            let rows = tiles
                .iter()
                .map(|tile| TileData::from_tile(tile, viewer))
                .collect();
            (StatusCode::OK, Json(TileBoundsResponse::success(rows)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Tile bounds query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TileBoundsResponse::failure("Failed to fetch tiles")),
            )
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

async fn execute_action(
    State(app): State<Arc<App>>,
    Json(request): Json<ExecuteActionRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    let valid = request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = app
        .use_cases
        .actions
        .execute
        .execute(valid.player_id, valid.action, valid.tile_id)
        .await
        .map_err(|e| match e {
            ExecuteActionError::PlayerNotFound(_) | ExecuteActionError::TileNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            ExecuteActionError::Repo(e) => ApiError::from(e),
        })?;
    Ok(Json(outcome))
}

// =============================================================================
// Players
// =============================================================================

async fn get_player(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<PlayerData>, ApiError> {
    let id = PlayerId::parse(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let player = app
        .use_cases
        .players
        .get
        .execute(id)
        .await
        .map_err(|e| match e {
            GetPlayerError::NotFound(_) => ApiError::NotFound(e.to_string()),
            GetPlayerError::Repo(e) => ApiError::from(e),
        })?;
    Ok(Json(PlayerData::from(&player)))
}

async fn create_player(
    State(app): State<Arc<App>>,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerData>), ApiError> {
    let username = request
        .username()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let player = app
        .use_cases
        .players
        .create
        .execute(username)
        .await
        .map_err(|e| match e {
            CreatePlayerError::UsernameTaken(_) => ApiError::Conflict(e.to_string()),
            CreatePlayerError::Invalid(_) => ApiError::BadRequest(e.to_string()),
            CreatePlayerError::Repo(e) => ApiError::from(e),
        })?;
    Ok((StatusCode::CREATED, Json(PlayerData::from(&player))))
}

async fn list_player_events(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActionEvent>>, ApiError> {
    let id = PlayerId::parse(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let events = app.repositories.events.list_for_player(id).await?;
    Ok(Json(events))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(AckResponse::error(message))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
