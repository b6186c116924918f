use std::env;

/// Application configuration, read from the environment once at startup and
/// passed through `AppState`.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub openrouter_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub site_url: String,
    pub site_name: String,
    pub port: u16,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:chat.db".to_string());

        let openrouter_api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let site_url =
            env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "CGT AI Chat App".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number")?;

        let debug = env::var("APP_ENV")
            .map(|environment| environment != "production")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            openrouter_api_key,
            gemini_api_key,
            site_url,
            site_name,
            port,
            debug,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: connection string".to_string());
        }

        Ok(())
    }
}
