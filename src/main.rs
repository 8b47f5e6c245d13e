use energy_reports_api::api::{self, AppState};
use energy_reports_api::llm::OpenAiChatClient;
use energy_reports_api::repositories::{DocumentStore, PgDocumentStore};
use energy_reports_api::services::{InsightService, ReportService};
use energy_reports_api::{db, Config};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Starting energy-reports-api");

    let cfg_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.yaml".into());
    let cfg = Config::load(&cfg_path)?;
    info!(path = %cfg_path, "Configuration loaded");

    let pool = db::connect(&cfg.database.url, cfg.database.max_connections).await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    db::ensure_schema(&pool).await?;
    info!("Connected to database");

    if cfg.llm.api_key.is_empty() {
        warn!("No model API key configured; insight requests will fail upstream");
    }

    let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool.clone()));
    let model = Arc::new(OpenAiChatClient::new(&cfg.llm));
    let state = AppState {
        reports: ReportService::new(store.clone(), cfg.collections.clone()),
        insights: InsightService::new(store, model, cfg.collections.molten_metal.clone()),
    };

    let router = api::create_router(state);
    let addr = cfg.api_bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("API server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "API server error");
    }

    pool.close().await;
    info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
