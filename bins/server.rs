use common::utils::logging::{init_logging, LogStyle};
use configs::{AppConfig, LogFormat};
use tracing::{error, info};
use uuid::Uuid;

fn log_style(format: LogFormat) -> LogStyle {
    match format {
        LogFormat::Compact => LogStyle::Compact,
        LogFormat::Json => LogStyle::Json,
    }
}

fn main() -> std::process::ExitCode {
    // Load .env first so RUST_LOG and the config variables take effect.
    dotenvy::dotenv().ok();

    let cfg = AppConfig::load_and_validate();
    let style = cfg.as_ref().map(|c| log_style(c.logging.format)).unwrap_or_default();
    init_logging(style);
    info!(service = "mapservice", event = "logger_init", "tracing subscriber initialized");

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "mapservice", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "mapservice",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "mapservice", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "mapservice",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        backend = ?cfg.storage.backend,
        "map service starting"
    );

    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "mapservice", event = "stop", %service_id, pid, "map service stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "mapservice", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
