use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use models::GameMap;
use tracing::{info, warn};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/api/maps", tag = "maps",
    responses(
        (status = 200, description = "All stored maps", body = [GameMap]),
        (status = 500, description = "Store Failure", body = crate::errors::ErrorBody)
    )
)]
pub async fn list_maps(State(state): State<AppState>) -> Result<Response, JsonApiError> {
    let maps = state.repo.get_map_list().await?;
    info!(count = maps.len(), "list maps");
    Ok(state.formatter.render(StatusCode::OK, &maps))
}

#[utoipa::path(
    get, path = "/api/maps/{id}", tag = "maps",
    params(("id" = String, Path, description = "Map ID")),
    responses(
        (status = 200, description = "OK", body = GameMap),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 500, description = "Store Failure", body = crate::errors::ErrorBody)
    )
)]
pub async fn get_map(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, JsonApiError> {
    let map = state.repo.get_map(&id).await?;
    Ok(state.formatter.render(StatusCode::OK, &map))
}

/// Upsert a map. The path id replaces whatever id the body carries, and the
/// reply is 201 for both creates and updates.
#[utoipa::path(
    put, path = "/api/maps/{id}", tag = "maps",
    params(("id" = String, Path, description = "Map ID")),
    request_body = GameMap,
    responses(
        (status = 201, description = "Stored", body = GameMap),
        (status = 400, description = "Invalid Map Payload", body = crate::errors::ErrorBody),
        (status = 500, description = "Store Failure", body = crate::errors::ErrorBody)
    )
)]
pub async fn put_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, JsonApiError> {
    let map: GameMap = serde_json::from_slice(&body).map_err(|e| {
        warn!(map_id = %id, error = %e, "rejected map payload");
        JsonApiError::invalid_payload(e)
    })?;
    if !map.id.is_empty() && map.id != id {
        info!(map_id = %id, body_id = %map.id, "body id overridden by path");
    }

    let stored = state.repo.update_map(&id, map.with_id(id.as_str())).await?;
    info!(map_id = %stored.id, rows = stored.tiles.len(), "map stored");
    Ok(state.formatter.render(StatusCode::CREATED, &stored))
}
