//! LabVault Agent Tool Server
//!
//! Exposes asset operations to AI agents over MCP on stdio. stdout carries
//! the protocol, so all logging goes to stderr.

mod activity;
mod format;
mod tools;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activity::{ActivityIntervals, ActivityTracker};
use labvault_common::{
    config::{AppConfig, StoreBackend},
    metrics::{register_metrics, LATENCY_BUCKETS},
    services::Services,
    store::{MemoryStore, PgStore, SharedStore},
};
use tools::AssetToolServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing on stderr; stdout belongs to the transport
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting LabVault agent tool server v{}", labvault_common::VERSION);

    // Initialize metrics
    register_metrics();
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                LATENCY_BUCKETS,
            )?
            .install()?;
        info!("Prometheus exporter listening on {}", metrics_addr);
    }

    // Initialize the document store
    let store: SharedStore = match config.store.backend {
        StoreBackend::Postgres => Arc::new(PgStore::connect(&config.store).await?),
        StoreBackend::Memory => {
            warn!("Using in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Connection-activity tracking for the single stdio peer
    let tracker = Arc::new(ActivityTracker::new());
    let intervals = ActivityIntervals::spawn(tracker.clone(), &config.agent);
    info!(connection = tracker.connection_id(), "Agent transport ready");

    // Serve tools until the peer closes stdio or we get a signal
    let server = AssetToolServer::new(Services::new(store), tracker);
    let service = server.serve(stdio()).await?;

    // A signal cancels the running service; otherwise we wait for the
    // peer to close the transport.
    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        shutdown_signal().await;
        cancel.cancel();
    });

    service.waiting().await?;
    intervals.shutdown();
    info!("Agent shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
