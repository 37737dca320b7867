//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error};

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, Generation},
};

use super::mapper::{from_gemini_response, to_gemini_request};
use super::types::{ErrorResponse, GenerateContentResponse};

/// Public Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini model identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    #[default]
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Any other model id the API accepts
    Custom(String),
}

impl GeminiModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25FlashLite => "gemini-2.5-flash-lite",
            GeminiModel::Custom(id) => id,
        }
    }
}

impl FromStr for GeminiModel {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(LlmError::InvalidRequest("Model id must not be empty".to_string())),
            "gemini-2.5-pro" => Ok(GeminiModel::Gemini25Pro),
            "gemini-2.5-flash" => Ok(GeminiModel::Gemini25Flash),
            "gemini-2.5-flash-lite" => Ok(GeminiModel::Gemini25FlashLite),
            other => Ok(GeminiModel::Custom(other.to_string())),
        }
    }
}

impl std::fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,
    /// API root, without a trailing slash
    pub base_url: String,
    /// Model to use
    pub model: GeminiModel,
    /// Upper bound on a whole request, connect to last body byte
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the public API with the default model and a 30s timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GeminiModel::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key, never placed in the URL
    api_key: String,
    /// API root
    base_url: String,
    /// Model to use
    model: GeminiModel,
    /// Request timeout, reported back on expiry
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::InvalidRequest(
                "Gemini API key must not be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            timeout: config.timeout,
        })
    }

    /// The model this client talks to
    pub fn model(&self) -> &GeminiModel {
        &self.model
    }

    /// Build the endpoint URL for a one-shot generation
    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        )
    }

    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Generation, LlmError> {
        let gemini_request = to_gemini_request(request);

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Gemini API error");
            let body = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
                _ => body,
            };
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(model = %self.model, body = %body, "Gemini response");
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        Ok(from_gemini_response(parsed))
    }
}
