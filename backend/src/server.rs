//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.

use crate::config::Config;
use crate::database::{create_pool, DbPool};
use crate::handlers;
use crate::providers::ResponseGenerator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub generator: Arc<ResponseGenerator>,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ResponseGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}

/// Server configuration
pub struct ServerConfig {
    /// Directory holding the static frontend, entry point `index.html`
    pub frontend_dir: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            frontend_dir: "../frontend",
        }
    }
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Debug runs default to verbose logging, overridable with RUST_LOG
    let default_level = if app_config.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(" AI CHAT BACKEND STARTING");
    info!(" Database URL: {}", app_config.database_url);

    // Ensure the data directory exists for the SQLite database
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!(" Created database directory: {:?}", parent);
            }
        }
    }

    info!(" Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(" Migrations complete");

    let generator = Arc::new(ResponseGenerator::from_config(&app_config));

    let bind_address = format!("0.0.0.0:{}", app_config.port);

    let state = AppState {
        pool,
        config: app_config,
        generator,
    };

    let app = create_router(state, config.frontend_dir);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(" SERVER READY: http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, frontend_dir: &str) -> Router {
    let frontend = std::path::Path::new(frontend_dir);

    // The SPA is served same-origin; CORS stays open for local dev setups
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/chats", get(handlers::list_chats))
        .route("/chats/{chat_id}", get(handlers::get_chat))
        .route("/chat", post(handlers::post_chat))
        .route_service("/", ServeFile::new(frontend.join("index.html")))
        .fallback_service(ServeDir::new(frontend))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
