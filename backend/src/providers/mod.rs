//! AI completion providers and the fallback chain.
//!
//! Provider priority:
//! 1. OpenRouter
//! 2. Gemini (fallback)
//! 3. Static unavailability message

pub mod gemini;
pub mod openrouter;

use crate::config::Config;
use crate::prompt::build_prompt;
use gemini::GeminiClient;
use openrouter::OpenRouterClient;
use thiserror::Error;
use tracing::{info, warn};

/// Returned when every provider is unconfigured or failed.
pub const FALLBACK_MESSAGE: &str =
    "All AI providers are currently unavailable. Please try again later.";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("provider returned no completion text")]
    EmptyCompletion,
}

/// Holds one client per configured provider and walks them in priority
/// order. Provider failures are logged and absorbed; `generate` always
/// produces a reply string.
pub struct ResponseGenerator {
    openrouter: Option<OpenRouterClient>,
    gemini: Option<GeminiClient>,
}

impl ResponseGenerator {
    pub fn from_config(config: &Config) -> Self {
        let openrouter = config.openrouter_api_key.clone().map(|key| {
            OpenRouterClient::new(key, config.site_url.clone(), config.site_name.clone())
        });
        let gemini = config.gemini_api_key.clone().map(GeminiClient::new);

        match (&openrouter, &gemini) {
            (None, None) => warn!("[AI] No provider credentials configured, replies will use the static fallback"),
            (primary, secondary) => info!(
                "[AI] Providers configured: openrouter={} gemini={}",
                primary.is_some(),
                secondary.is_some()
            ),
        }

        Self { openrouter, gemini }
    }

    /// Generate an assistant reply for the user message. At most one request
    /// is sent per provider; errors fall through to the next step.
    pub async fn generate(&self, user_message: &str) -> String {
        let prompt = build_prompt(user_message);

        if let Some(client) = &self.openrouter {
            match client.complete(&prompt).await {
                Ok(text) => return text,
                Err(e) => warn!("[AI] OpenRouter failed, falling back to Gemini: {}", e),
            }
        }

        if let Some(client) = &self.gemini {
            match client.complete(&prompt).await {
                Ok(text) => return text,
                Err(e) => warn!("[AI] Gemini provider failed: {}", e),
            }
        }

        FALLBACK_MESSAGE.to_string()
    }
}
