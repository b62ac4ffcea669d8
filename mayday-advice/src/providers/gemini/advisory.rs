//! Gemini advisory provider implementation

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::providers::{invalid_response, request_failed};
use crate::{build_prompt, AdvisoryProvider};
use async_trait::async_trait;
use mayday_core::{AdviceError, MaydayError, MaydayResult};
use reqwest::Client;
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model, matching the dispatcher deployment.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini advisory provider.
///
/// The per-request timeout should sit below the gateway's chat deadline so a
/// slow backend degrades into the fallback sentence instead of a gateway
/// timeout.
pub struct GeminiAdvisoryProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiAdvisoryProvider {
    /// Create a new Gemini advisory provider.
    ///
    /// # Arguments
    /// * `api_key` - Google Generative Language API key
    /// * `model` - Model name (e.g., "gemini-2.0-flash")
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            timeout,
        }
    }

    /// Create a provider with the default model and a 4 second timeout.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_GEMINI_MODEL, Duration::from_secs(4))
    }

    /// Pull the advisory sentence out of a generateContent response.
    fn extract_advice(response: GenerateContentResponse) -> MaydayResult<String> {
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| invalid_response("gemini", "response carried no candidates"))?;

        let trimmed = text.trim().to_string();
        if trimmed.is_empty() {
            return Err(invalid_response("gemini", "candidate text was empty"));
        }
        Ok(trimmed)
    }
}

#[async_trait]
impl AdvisoryProvider for GeminiAdvisoryProvider {
    async fn advise(&self, message: &str) -> MaydayResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(message),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MaydayError::Advice(AdviceError::Timeout {
                        provider: "gemini".to_string(),
                    })
                } else {
                    request_failed("gemini", 0, format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(request_failed(
                "gemini",
                status.as_u16() as i32,
                error_text,
            ));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            invalid_response("gemini", format!("Failed to parse response: {}", e))
        })?;

        Self::extract_advice(body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

impl std::fmt::Debug for GeminiAdvisoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdvisoryProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
