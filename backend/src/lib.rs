pub mod config;
pub mod database;
pub mod handlers;
pub mod prompt;
pub mod providers;
pub mod server;

pub use config::Config;
pub use database::DbPool;
