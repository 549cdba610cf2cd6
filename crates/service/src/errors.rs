use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
}

impl RepositoryError {
    pub fn not_found(map_id: &str) -> Self { Self::NotFound(format!("map {} not found", map_id)) }

    pub fn store(err: impl std::fmt::Display) -> Self { Self::Store(err.to_string()) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
