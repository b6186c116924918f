//! # Chat Handler Tests
//!
//! Test suite for the chat endpoints (listing, history, and the turn flow).


use crate::config::Config;
use crate::database::DbPool;
use crate::providers::ResponseGenerator;
use crate::server::AppState;
use axum::routing::{get, post};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

/// Setup test database with schema
pub async fn setup_test_db() -> DbPool {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create test config. No provider credentials, so the turn flow resolves to
/// the static fallback reply without any outbound calls.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        openrouter_api_key: None,
        gemini_api_key: None,
        site_url: "http://localhost:5000".to_string(),
        site_name: "CGT AI Chat App".to_string(),
        port: 5000,
        debug: false,
    }
}

/// Create test app with the API routes (static file serving left out)
pub fn test_app(pool: DbPool, config: Config) -> Router {
    let generator = Arc::new(ResponseGenerator::from_config(&config));
    let state = AppState {
        pool,
        config,
        generator,
    };

    Router::new()
        .route("/health", get(crate::handlers::health))
        .route("/chats", get(crate::handlers::list_chats))
        .route("/chats/{chat_id}", get(crate::handlers::get_chat))
        .route("/chat", post(crate::handlers::post_chat))
        .with_state(state)
}

pub async fn chat_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM chats")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn message_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await
        .unwrap()
}
