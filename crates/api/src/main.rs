use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use outreach_api::config::ServerConfig;
use outreach_api::router::build_app_router;
use outreach_api::state::AppState;
use outreach_cloud::StorageConfig;
use outreach_db::store::{ContentStore, MemoryContentStore, PgContentStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        gate_mode = ?config.gate_mode,
        "Loaded server configuration"
    );

    // --- Content store ---
    let pg_store = match std::env::var("DATABASE_URL") {
        Ok(database_url) => Some(connect_store(&database_url).await),
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory content store");
            None
        }
    };
    let store: Arc<dyn ContentStore> = match &pg_store {
        Some(pg) => Arc::new(pg.clone()),
        None => Arc::new(MemoryContentStore::new()),
    };

    // --- Blob storage ---
    let uploader = outreach_cloud::build_uploader(&StorageConfig::from_env()).await;

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        uploader,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pg) = pg_store {
        let timeout = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(timeout, pg.close()).await.is_err() {
            tracing::warn!("Timed out closing the database pool");
        } else {
            tracing::info!("Database pool closed");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Connect, migrate, and lift legacy impact rows before serving.
async fn connect_store(database_url: &str) -> PgContentStore {
    let pool = outreach_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    outreach_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    outreach_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store = PgContentStore::new(pool);
    store
        .upgrade_legacy_rows()
        .await
        .expect("Failed to upgrade legacy impact rows");
    store
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
