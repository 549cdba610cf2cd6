use std::sync::Arc;

use service::MapRepository;

use crate::render::JsonFormatter;

/// Everything a handler needs, supplied explicitly when the router is built.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn MapRepository>,
    pub formatter: JsonFormatter,
}

impl AppState {
    pub fn new(repo: Arc<dyn MapRepository>, formatter: JsonFormatter) -> Self {
        Self { repo, formatter }
    }
}
