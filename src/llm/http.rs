//! HTTP client for an OpenAI-compatible chat completions API
//!
//! Requests are sent once. Failures are classified so callers can tell a
//! transient outage from a malformed answer, but nothing is retried here.

use reqwest::{Client as ReqwestClient, StatusCode};
use tracing::{debug, error, instrument, warn};

use crate::llm::TextGenerator;
use crate::llm::error::LlmError;
use crate::llm::types::{ChatMessage, ChatRequest, ChatResponse};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API endpoint
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// HTTP client for chat completions
#[derive(Clone)]
pub struct ChatClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key sent as a bearer token
    api_key: String,
}

#[cfg(test)]
impl ChatClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Create a client for the default endpoint
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client for a custom OpenAI-compatible endpoint
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = ReqwestClient::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from `OPENAI_API_KEY` and optional `OPENAI_BASE_URL`
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_values(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        )
    }

    fn from_values(api_key: Option<String>, base_url: Option<String>) -> Result<Self, LlmError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey(API_KEY_ENV))?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(api_key, base_url)
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), level = "debug", fields(model = %request.model))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!("Sending POST request to {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transient(format!("Request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Transient(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            error!("API error: {} - {}", status, response_text);
            return Err(classify_status(status, response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse response: {}", e);
            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }

    /// Bind the client to a model
    pub fn model(&self, model: impl Into<String>) -> ChatModel {
        ChatModel {
            client: self.clone(),
            model: model.into(),
        }
    }
}

/// Map a non-success status to an error
fn classify_status(status: StatusCode, message: String) -> LlmError {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        LlmError::Transient(format!("{} - {}", status, message))
    } else {
        LlmError::Api {
            status_code: status.as_u16(),
            message,
        }
    }
}

/// A chat client bound to one model
#[derive(Debug, Clone)]
pub struct ChatModel {
    client: ChatClient,
    model: String,
}

impl ChatModel {
    pub fn name(&self) -> &str {
        &self.model
    }
}

impl TextGenerator for ChatModel {
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        };

        let response = self.client.chat(&request).await?;
        if response.is_truncated() {
            warn!("Completion from {} stopped at the token limit", self.model);
        }

        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no text".to_string()))
    }
}
