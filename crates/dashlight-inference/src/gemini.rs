//! Gemini `generateContent` backend implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dashlight_core::{defaults, Error, Result};

use crate::backend::{ContentPart, InferenceBackend};

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL.
    pub base_url: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model identifier (e.g. "gemini-1.5-pro-002").
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL` and `GEMINI_BASE_URL`
    /// fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(defaults::ENV_GEMINI_API_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", defaults::ENV_GEMINI_API_KEY)))?;
        let model = std::env::var(defaults::ENV_GEMINI_MODEL)
            .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string());
        let base_url = std::env::var(defaults::ENV_GEMINI_BASE_URL)
            .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string());
        Ok(Self {
            base_url,
            api_key,
            model,
            timeout_secs: defaults::BACKEND_TIMEOUT_SECS,
        })
    }
}

/// Gemini-based inference backend.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables. Fails when `GEMINI_API_KEY` is
    /// missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [ContentPart],
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Error envelope the Gemini API returns on non-2xx responses.
#[derive(Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's text parts, if any.
    fn extract_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl InferenceBackend for GeminiBackend {
    async fn generate(&self, parts: &[ContentPart]) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // Surface the API's own message when the error envelope parses.
            let message = match serde_json::from_str::<GeminiErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("{}: {}", status, body),
            };
            tracing::error!(
                subsystem = "inference",
                op = "generate",
                model = %self.config.model,
                status = %status,
                "Gemini call failed"
            );
            return Err(Error::Backend(message));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("failed to parse response: {}", e)))?;

        let text = result.extract_text().ok_or(Error::EmptyModelResponse)?;
        tracing::debug!(
            subsystem = "inference",
            op = "generate",
            model = %self.config.model,
            response_len = text.len(),
            "Gemini call succeeded"
        );
        Ok(text)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1beta/models", self.config.base_url);
        match self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
