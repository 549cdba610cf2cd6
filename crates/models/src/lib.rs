//! Map documents exchanged over the API and persisted by the repositories.

pub mod map;
pub mod id;
#[cfg(feature = "fixtures")]
pub mod fixtures;

pub use map::{GameMap, MapMetadata, MapTile};
