//! OpenAI chat completions client.
//!
//! Implements [`Completion`] for the answer fetcher and exposes structured
//! output for the LLM-backed sentiment classifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use visibility_core::{Config, OpenAIClient};
//!
//! let client = OpenAIClient::from_config(&Config::from_env()?);
//! let answer = client.complete("best Air Care brands (0)").await?;
//! ```

pub mod schema;
pub mod types;

pub use types::{ChatRequest, ChatResponse, Message, Usage};

use async_trait::async_trait;
use reqwest::{header, Client};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::error::{Result, VisibilityError};
use crate::security::ApiKey;
use crate::traits::completion::Completion;

/// OpenAI API client bound to one model and output limit.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Chat completion.
    ///
    /// Returns the first choice's content.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(self.completions_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                VisibilityError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(VisibilityError::Api(format!(
                "{} ({})",
                types::describe_error_body(&error_text),
                status
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| VisibilityError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VisibilityError::Api("No response from OpenAI".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = chat_response.usage.as_ref().map(|u| u.total_tokens),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Type-safe structured output.
    ///
    /// Sends a strict JSON schema generated from `T` and deserializes the
    /// reply into it.
    pub async fn extract<T: JsonSchema + DeserializeOwned>(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_prompt))
            .temperature(0.0)
            .json_schema(T::schema_name(), schema::strict_schema::<T>());

        let response = self.chat_completion(request).await?;

        serde_json::from_str(strip_code_blocks(&response.content)).map_err(|e| {
            VisibilityError::Parse(format!("Failed to deserialize response: {}", e))
        })
    }
}

#[async_trait]
impl Completion for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::single_turn(&self.model, prompt).output_limit(self.max_tokens);
        Ok(self.chat_completion(request).await?.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Strip markdown code fences from a JSON response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
