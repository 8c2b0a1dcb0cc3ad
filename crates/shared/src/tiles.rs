//! Tile bounds query

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use twelveninja_domain::{AxialBounds, AxialCoord, PlayerId, Tile, TileId};

use crate::ProtocolError;

/// Extent applied per axis when a bound is omitted from a query.
pub const SERVER_DEFAULT_EXTENT: i32 = 128;

/// Request for every tile inside an axial rectangle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileBoundsRequest {
    #[serde(default)]
    pub q_min: Option<i32>,
    #[serde(default)]
    pub q_max: Option<i32>,
    #[serde(default)]
    pub r_min: Option<i32>,
    #[serde(default)]
    pub r_max: Option<i32>,
    /// Viewer whose fog is applied to `explored`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<Uuid>,
}

impl TileBoundsRequest {
    pub fn new(bounds: AxialBounds, viewer: Option<PlayerId>) -> Self {
        Self {
            q_min: Some(bounds.q_min()),
            q_max: Some(bounds.q_max()),
            r_min: Some(bounds.r_min()),
            r_max: Some(bounds.r_max()),
            player_id: viewer.map(PlayerId::to_uuid),
        }
    }

    /// Fill omitted bounds with the server default and validate ordering.
    pub fn bounds(&self) -> Result<AxialBounds, ProtocolError> {
        let bounds = AxialBounds::new(
            self.q_min.unwrap_or(-SERVER_DEFAULT_EXTENT),
            self.q_max.unwrap_or(SERVER_DEFAULT_EXTENT),
            self.r_min.unwrap_or(-SERVER_DEFAULT_EXTENT),
            self.r_max.unwrap_or(SERVER_DEFAULT_EXTENT),
        )?;
        Ok(bounds)
    }

    pub fn viewer(&self) -> Option<PlayerId> {
        self.player_id.map(PlayerId::from_uuid)
    }
}

/// `{ok: true, tiles}` or `{ok: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileBoundsResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<TileData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TileBoundsResponse {
    pub fn success(tiles: Vec<TileData>) -> Self {
        Self {
            ok: true,
            tiles: Some(tiles),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            tiles: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<Vec<TileData>, ProtocolError> {
        if !self.ok {
            let error = self.error.unwrap_or_else(|| "Tile query failed".to_string());
            return Err(ProtocolError::rejected(error));
        }
        Ok(self.tiles.unwrap_or_default())
    }
}

/// Tile row as stored and served (snake_case columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub id: Uuid,
    pub q: i32,
    pub r: i32,
    pub tile_type: String,
    #[serde(default)]
    pub owner_code: Option<String>,
    #[serde(default)]
    pub discovered_by: Vec<Uuid>,
    /// Fog flag for the requesting viewer. Advisory; clients derive fog
    /// from `discovered_by`.
    #[serde(default)]
    pub explored: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl TileData {
    pub fn from_tile(tile: &Tile, viewer: Option<PlayerId>) -> Self {
        Self {
            id: tile.id().to_uuid(),
            q: tile.coord().q,
            r: tile.coord().r,
            tile_type: tile.tile_type().to_string(),
            owner_code: tile.owner_code().map(str::to_string),
            discovered_by: tile.discovered_by().iter().map(|p| p.to_uuid()).collect(),
            explored: viewer.is_some_and(|v| tile.is_discovered_by(v)),
            metadata: tile.metadata().clone(),
        }
    }
}

impl From<TileData> for Tile {
    fn from(data: TileData) -> Self {
        Tile::from_parts(
            TileId::from_uuid(data.id),
            AxialCoord::new(data.q, data.r),
            data.tile_type,
            data.owner_code,
            data.discovered_by.into_iter().map(PlayerId::from_uuid).collect(),
            data.metadata,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_bounds_use_server_default() {
        let request: TileBoundsRequest = serde_json::from_str(r#"{"qMin": -3}"#).unwrap();
        let bounds = request.bounds().unwrap();
        assert_eq!(bounds.q_min(), -3);
        assert_eq!(bounds.q_max(), 128);
        assert_eq!(bounds.r_min(), -128);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let request: TileBoundsRequest =
            serde_json::from_value(json!({"qMin": 5, "qMax": 1, "rMin": 0, "rMax": 0})).unwrap();
        assert!(matches!(request.bounds(), Err(ProtocolError::Invalid(_))));
    }

    #[test]
    fn request_uses_camel_case_keys() {
        let bounds = AxialBounds::new(-1, 2, -3, 4).unwrap();
        let value = serde_json::to_value(TileBoundsRequest::new(bounds, None)).unwrap();
        assert_eq!(value, json!({"qMin": -1, "qMax": 2, "rMin": -3, "rMax": 4}));
    }

    #[test]
    fn failure_response_carries_error() {
        let response: TileBoundsResponse =
            serde_json::from_str(r#"{"ok": false, "error": "db down"}"#).unwrap();
        assert_eq!(
            response.into_result(),
            Err(ProtocolError::rejected("db down"))
        );
    }

    #[test]
    fn tile_row_explored_reflects_viewer() {
        let viewer = PlayerId::new();
        let tile = Tile::new(AxialCoord::new(2, -1), "forest")
            .with_metadata("name", json!("Whispering Pines"))
            .discovered_by_player(viewer);

        let seen = TileData::from_tile(&tile, Some(viewer));
        assert!(seen.explored);
        assert!(!TileData::from_tile(&tile, Some(PlayerId::new())).explored);
        assert!(!TileData::from_tile(&tile, None).explored);

        let back: Tile = seen.into();
        assert_eq!(back, tile);
    }
}
