//! Map builders for tests.

use crate::id::{IdGenerator, UuidV4Generator};
use crate::map::{GameMap, MapMetadata, MapTile};

pub const TEST_DESCRIPTION: &str = "Auto-generated Test Map";
pub const TEST_TILE_NAME: &str = "test-tile";

/// A `size` x `size` map with random ids.
pub fn generate_test_map(size: usize, author: &str) -> GameMap {
    generate_test_map_with(size, author, &UuidV4Generator)
}

pub fn generate_test_map_with(size: usize, author: &str, ids: &dyn IdGenerator) -> GameMap {
    let id = ids.next_id();
    let tiles = (0..size)
        .map(|_| (0..size).map(|_| make_tile(ids)).collect())
        .collect();
    GameMap {
        id,
        metadata: MapMetadata { author: author.to_string(), description: TEST_DESCRIPTION.to_string() },
        tiles,
    }
}

/// An open tile: every direction allowed, no sprite.
pub fn make_tile(ids: &dyn IdGenerator) -> MapTile {
    MapTile {
        id: ids.next_id(),
        tile_name: TEST_TILE_NAME.to_string(),
        sprite: String::new(),
        allow_up: true,
        allow_down: true,
        allow_left: true,
        allow_right: true,
    }
}
