use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::CompletionProvider;

/// Public API base used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAI client for the chat completions API
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API base URL, without the trailing route
    endpoint: String,
    /// Model used for completions
    model: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Candidate replies
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// Individual choice in a completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

/// Response of `GET /models`
#[derive(Debug, Deserialize)]
pub struct ModelList {
    pub data: Vec<ModelInfo>,
}

/// One entry of the model list
#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub id: String,
}

impl OpenAIRequest {
    /// Create a new request for `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: Some(content.into()),
        });
        self
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    ///
    /// An empty `endpoint` selects the public API.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint,
            model: model.into(),
        }
    }

    /// API base URL in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request
    pub async fn send(&self, request: &OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let api_url = format!("{}/chat/completions", self.endpoint);

        let response = self.client.post(&api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to OpenAI API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(map_status_error(status, error_text));
        }

        let parsed = response.json::<OpenAIResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))?;

        if let Some(usage) = &parsed.usage {
            debug!("OpenAI usage: {} prompt tokens, {} completion tokens", usage.prompt_tokens, usage.completion_tokens);
        }

        Ok(parsed)
    }

    /// List the models visible to the configured key
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let api_url = format!("{}/models", self.endpoint);

        let response = self.client.get(&api_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach OpenAI API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(map_status_error(status, error_text));
        }

        let models = response.json::<ModelList>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse model list: {}", e)))?;

        Ok(models.data.into_iter().map(|m| m.id).collect())
    }

    /// Extract text from a completion response
    pub fn extract_text_from_response(response: &OpenAIResponse) -> String {
        response.choices.first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionProvider for OpenAI {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = OpenAIRequest::new(&self.model)
            .add_message("system", system)
            .add_message("user", prompt);

        let response = self.send(&request).await?;
        Ok(Self::extract_text_from_response(&response))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.list_models().await.map(|_| ())
    }
}

/// Map a non-success HTTP status to a provider error
pub fn map_status_error(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(body),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(body),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: body,
        },
    }
}
