//! # Backend Service
//!
//! Thin entry point that delegates to the server module for setup.

use backend::server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ServerConfig {
        frontend_dir: "../frontend",
    };

    start_server(config).await
}
