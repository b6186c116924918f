//! OpenRouter chat-completions client (primary provider).

use super::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
const MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f64 = 0.2;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    site_url: String,
    site_name: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, site_url: String, site_name: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: OPENROUTER_URL.to_string(),
            api_key,
            site_url,
            site_name,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue one chat-completion request and return the first choice's
    /// trimmed text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("[AI] Requesting OpenRouter completion: {}", url);

        let payload = json!({
            "model": MODEL,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.site_name)
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: String,
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyCompletion)
    }
}
