//! OptiWave Server - Main entry point

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use optiwave_common::logging::{init_logging, LogConfig};
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::info;

use optiwave_server::{
    auth::TokenKeys, config::Config, db, features, middleware, storage::MediaStore,
};

/// Application state shared across the root handlers
#[derive(Clone)]
struct AppState {
    db: sqlx::SqlitePool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("optiwave-server".to_string())
        .filter_directives("optiwave_server=debug,tower_http=debug,sqlx=info".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    info!("Starting OptiWave Server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Initialize database connection pool and apply migrations
    let db_pool = db::connect(&config.database).await?;
    info!("Database connection pool established");

    db::migrate(&db_pool).await?;
    info!("Database migrations completed");

    // Initialize the upload storage directory
    let media = MediaStore::new(&config.storage.upload_dir);
    media.init().await?;
    info!(upload_dir = %config.storage.upload_dir.display(), "Media store initialized");

    let tokens = TokenKeys::new(&config.auth.token_secret);

    // Build the application router
    let app = create_router(db_pool, media, tokens, &config);

    // Create socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_router(
    db: sqlx::SqlitePool,
    media: MediaStore,
    tokens: TokenKeys,
    config: &Config,
) -> Router {
    let feature_state = features::FeatureState {
        db: db.clone(),
        media: media.clone(),
        tokens,
    };

    let api_routes = features::router(feature_state);

    Router::new()
        .route("/health", get(health_check))
        .with_state(AppState { db })
        .nest("/api", api_routes)
        // Uploaded binaries are served as static bytes, addressed only by
        // their server-generated stored filename.
        .nest_service("/uploads", ServeDir::new(media.root()))
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
