use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tile-grid map document.
///
/// `id` is the only key used for lookup and upsert. It may be omitted from a
/// request body because the path parameter always wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameMap {
    #[serde(default)]
    pub id: String,
    pub metadata: MapMetadata,
    /// Rows of tiles. Rows are not required to have equal length.
    pub tiles: Vec<Vec<MapTile>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MapMetadata {
    pub author: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapTile {
    pub id: String,
    pub tile_name: String,
    pub sprite: String,
    pub allow_up: bool,
    pub allow_down: bool,
    pub allow_left: bool,
    pub allow_right: bool,
}

impl GameMap {
    /// Returns the map with its id replaced.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
