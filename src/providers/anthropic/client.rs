//! Anthropic Client Implementation

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::LlmError;
use crate::normalizer::ReasoningMode;
use crate::providers::ChatStreamProvider;
use crate::stream::ChatStream;
use crate::types::{ChatRequest, ModelVariant};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;
use crate::utils::streaming::StreamFactory;

use super::streaming::AnthropicEventConverter;
use super::transformers::{ANTHROPIC_MODELS, build_request_body};
use super::{API_KEY_ENV, DEFAULT_BASE_URL};

/// Anthropic Client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key, DEFAULT_BASE_URL))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Read the key from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::with_config(ClientConfig::from_env(
            API_KEY_ENV,
            DEFAULT_BASE_URL,
        )?))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_header(name, value);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request body for this call. Images are fetched here, so a broken image
    /// fails the call before anything is sent to Anthropic.
    pub async fn build_request_body(
        &self,
        request: &ChatRequest,
        variant: &ModelVariant,
    ) -> Result<Value, LlmError> {
        build_request_body(&self.http_client, request, *variant)
            .await
            .map_err(|e| e.for_provider("anthropic"))
    }
}

#[async_trait]
impl ChatStreamProvider for AnthropicClient {
    type Selector = ModelVariant;

    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn resolve_model(&self, _request: &ChatRequest, selector: &ModelVariant) -> String {
        ANTHROPIC_MODELS.resolve(selector.magnitude()).to_string()
    }

    async fn chat_stream(
        &self,
        request: ChatRequest,
        selector: ModelVariant,
    ) -> Result<ChatStream, LlmError> {
        let body = self.build_request_body(&request, &selector).await?;
        let url = join_url(&self.config.base_url, "/v1/messages");
        let headers = ProviderHeaders::anthropic(self.config.api_key(), &self.config.http_config.headers)
            .map_err(|e| e.for_provider("anthropic"))?;

        tracing::debug!(
            url = %url,
            model = %self.resolve_model(&request, &selector),
            thinking = selector.reasoning_enabled(),
            "anthropic chat stream"
        );

        let request_builder = self.http_client.post(url).headers(headers).json(&body);
        StreamFactory::create_eventsource_stream(
            request_builder,
            AnthropicEventConverter::new(),
            ReasoningMode::NativeField,
        )
        .await
    }
}
