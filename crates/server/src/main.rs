//! crimereport server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use crimereport_api::{AppState, app};
use crimereport_common::{Config, open_store};
use crimereport_core::{
    DashboardService, LocalReportBackend, MockIdentityProvider, ReportBackend, ReportService,
    SessionManager,
};
use crimereport_db::repositories::ReportRepository;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Human-readable logs by default, JSON lines with `CRIMEREPORT_LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crimereport=debug,tower_http=debug".into());
    let json = std::env::var("CRIMEREPORT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    info!("Starting crimereport server...");

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    let store = open_store(&config.storage)
        .await
        .context("failed to open storage")?;
    info!(backend = ?config.storage.backend, data_dir = %config.storage.data_dir.display(), "Storage ready");

    let provider = MockIdentityProvider::new().with_latency(config.latency.auth());
    let session = SessionManager::initialize(store.clone(), Arc::new(provider))
        .await
        .context("failed to restore session")?;

    let backend: Arc<dyn ReportBackend> = Arc::new(LocalReportBackend::new(
        ReportRepository::new(store),
        config.latency.clone(),
    ));

    let state = AppState {
        session,
        report_service: ReportService::new(backend.clone()),
        dashboard_service: DashboardService::new(backend),
    };

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
