use utoipa::OpenApi;

use common::types::Health;
use models::{GameMap, MapMetadata, MapTile};

use crate::errors::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::maps::list_maps,
        crate::routes::maps::get_map,
        crate::routes::maps::put_map,
    ),
    components(
        schemas(
            Health,
            GameMap,
            MapMetadata,
            MapTile,
            ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "maps")
    )
)]
pub struct ApiDoc;
