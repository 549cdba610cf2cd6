//! Storage layer for map documents.
//! - `maps` holds the repository capability and its implementations.
//! - `storage` holds reusable collections the persistent repository delegates to.
//! - Handlers depend only on [`maps::repository::MapRepository`].

pub mod errors;
pub mod maps;
pub mod storage;

pub use errors::RepositoryError;
pub use maps::{
    document::{DocumentMapRepository, MapDocument},
    memory::InMemoryMapRepository,
    repository::MapRepository,
};
