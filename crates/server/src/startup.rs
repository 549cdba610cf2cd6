use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend, StorageConfig};
use service::{storage::JsonMapStore, DocumentMapRepository, InMemoryMapRepository, MapDocument, MapRepository};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{render::JsonFormatter, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Choose the repository implementation named by the storage config.
pub async fn build_repository(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn MapRepository>> {
    match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "using in-memory map repository");
            Ok(Arc::new(InMemoryMapRepository::new()))
        }
        StorageBackend::JsonFile => {
            let store = JsonMapStore::<String, MapDocument>::new(Path::new(&cfg.path)).await?;
            info!(backend = "json_file", path = %cfg.path, "using document map repository");
            Ok(Arc::new(DocumentMapRepository::new(store)))
        }
    }
}

/// Build the app for a config without binding a socket.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let repo = build_repository(&cfg.storage).await?;
    let state = AppState::new(repo, JsonFormatter::new(cfg.server.pretty_json));
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl+c; shutdown signal disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting map service");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("map service stopped");
    Ok(())
}
