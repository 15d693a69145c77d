//! TKD Mock Server Entry Point
//!
//! Bootstraps configuration, loads the snapshot into the knowledge store,
//! and starts the Axum HTTP server.

use std::sync::Arc;

use clap::Parser;
use tkd_api::{create_api_router, AppState, Args, AuditLog};
use tkd_storage::KnowledgeStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tkd_api={},info", args.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // a corrupt snapshot is fatal at startup
    let store = Arc::new(KnowledgeStore::open(&args.state_file)?);
    let audit = Arc::new(AuditLog::new(&args.log_file));
    let app = create_api_router(AppState::new(store, audit));

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "tkd-mock listening on http://{} (log: {}, state: {})",
        addr,
        args.log_file.display(),
        args.state_file.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
