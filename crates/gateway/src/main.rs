//! LabVault API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Request routing for every entity in the lab-asset domain
//! - Observability (logging, metrics, tracing)
//! - Graceful shutdown

mod handlers;


use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use labvault_common::{
    config::{AppConfig, StoreBackend},
    metrics::{register_metrics, RequestMetrics, LATENCY_BUCKETS},
    services::Services,
    store::{MemoryStore, PgStore, SharedStore},
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Services,
    pub store: SharedStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting LabVault API Gateway v{}", labvault_common::VERSION);

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

    // Create app state
    let state = AppState {
        config: config.clone(),
        services: Services::new(store.clone()),
        store,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Entity routes keep the legacy mount points and verbs
    let entity_routes = Router::new()
        .route(
            "/institute",
            get(handlers::institute::list).post(handlers::institute::create),
        )
        .route(
            "/institute/{id}",
            get(handlers::institute::get_by_id)
                .put(handlers::institute::update)
                .delete(handlers::institute::remove),
        )
        .route(
            "/organisation",
            get(handlers::organisation::list).post(handlers::organisation::create),
        )
        .route(
            "/organisation/{id}",
            get(handlers::organisation::get_by_id)
                .put(handlers::organisation::update)
                .delete(handlers::organisation::remove),
        )
        .route(
            "/department",
            get(handlers::department::list).post(handlers::department::create),
        )
        .route(
            "/department/{id}",
            get(handlers::department::get_by_id)
                .put(handlers::department::update)
                .delete(handlers::department::remove),
        )
        .route(
            "/laboratory",
            get(handlers::laboratory::list).post(handlers::laboratory::create),
        )
        .route(
            "/laboratory/{id}",
            get(handlers::laboratory::get_by_id)
                .put(handlers::laboratory::update)
                .delete(handlers::laboratory::remove),
        )
        .route(
            "/users",
            get(handlers::user::list).post(handlers::user::create),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_by_id)
                .put(handlers::user::update)
                .delete(handlers::user::remove),
        )
        .route(
            "/role",
            get(handlers::role::list).post(handlers::role::create),
        )
        .route(
            "/role/{id}",
            get(handlers::role::get_by_id)
                .put(handlers::role::update)
                .delete(handlers::role::remove),
        )
        .route(
            "/assets",
            get(handlers::asset::list).post(handlers::asset::create),
        )
        .route(
            "/assets/{id}",
            get(handlers::asset::get_by_id)
                .put(handlers::asset::update)
                .delete(handlers::asset::remove),
        )
        .route(
            "/procedure",
            get(handlers::procedure::list).post(handlers::procedure::create),
        )
        .route(
            "/procedure/{id}",
            get(handlers::procedure::get_by_id)
                .put(handlers::procedure::update)
                .delete(handlers::procedure::remove),
        )
        .route(
            "/runs",
            get(handlers::run::list).post(handlers::run::create),
        )
        .route(
            "/runs/{id}",
            get(handlers::run::get_by_id)
                .put(handlers::run::update)
                .delete(handlers::run::remove),
        )
        .route(
            "/analytics",
            get(handlers::analytics::list).post(handlers::analytics::create),
        )
        .route(
            "/analytics/{id}",
            get(handlers::analytics::get_by_id)
                .put(handlers::analytics::update)
                .delete(handlers::analytics::remove),
        )
        .route(
            "/reports",
            get(handlers::report::list).post(handlers::report::create),
        )
        .route(
            "/reports/{id}",
            get(handlers::report::get_by_id)
                .put(handlers::report::update)
                .delete(handlers::report::remove),
        )
        .route(
            "/script",
            get(handlers::script::list).post(handlers::script::create),
        )
        .route(
            "/script/{id}",
            get(handlers::script::get_by_id)
                .put(handlers::script::update)
                .delete(handlers::script::remove),
        );

    // Compose the app
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .merge(entity_routes)
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Record request count and latency for every request
async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let tracker = RequestMetrics::start(&method, &endpoint);
    let response = next.run(req).await;
    tracker.finish(response.status().as_u16());
    response
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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
