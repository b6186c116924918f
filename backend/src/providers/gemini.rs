//! Gemini generate-content client (secondary provider).

use super::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-3-flash-preview";
// The upstream service exposes no bound of its own; keep parity with the
// primary provider so a stalled call cannot hold a request open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: GEMINI_URL.to_string(),
            api_key,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue one generate-content request and return the candidate's trimmed
    /// text. The text lives in `content.parts`; older response shapes carry
    /// it in a top-level `output` field instead, which is used as fallback.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);

        debug!("[AI] Requesting Gemini completion: {}", url);

        let payload = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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
        struct GenerateContentResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        #[derive(Deserialize)]
        struct Candidate {
            #[serde(default)]
            content: Option<Content>,
            #[serde(default)]
            output: Option<String>,
        }

        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }

        #[derive(Deserialize)]
        struct Part {
            #[serde(default)]
            text: Option<String>,
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let candidate = generated
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyCompletion)?;

        let text = candidate
            .content
            .and_then(|content| {
                content
                    .parts
                    .into_iter()
                    .find_map(|part| part.text.filter(|text| !text.trim().is_empty()))
            })
            .or(candidate.output);

        text.map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyCompletion)
    }
}
