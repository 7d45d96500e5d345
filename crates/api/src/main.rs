use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiftreg_api::config::ServerConfig;
use swiftreg_api::router::build_app_router;
use swiftreg_api::state::AppState;
use swiftreg_core::bulk_loader::BulkLoader;
use swiftreg_core::memory::InMemoryStore;
use swiftreg_core::service::RegistryService;
use swiftreg_core::store::SwiftCodeStore;
use swiftreg_db::PgSwiftCodeStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "swiftreg_api=debug,swiftreg_core=info,swiftreg_db=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store: Arc<dyn SwiftCodeStore> = match &config.database_url {
        Some(database_url) => {
            let pool = swiftreg_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            swiftreg_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            swiftreg_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgSwiftCodeStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is not persisted");
            Arc::new(InMemoryStore::new())
        }
    };

    // --- Startup import ---
    if let Some(path) = &config.import_file {
        let loader = BulkLoader::new(Arc::clone(&store)).with_batch_size(config.import_batch_size);
        match loader.load_file_if_empty(path).await {
            Ok(Some(summary)) => tracing::info!(
                imported = summary.imported,
                skipped = summary.skipped,
                "Startup import finished"
            ),
            Ok(None) => {}
            Err(err) => tracing::error!(path = %path.display(), error = %err, "Startup import failed"),
        }
    }

    // --- Router ---
    let state = AppState::new(RegistryService::new(store));
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

    tracing::info!("Graceful shutdown complete");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
