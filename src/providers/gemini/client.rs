//! Gemini Client Implementation

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::LlmError;
use crate::normalizer::ReasoningMode;
use crate::providers::ChatStreamProvider;
use crate::stream::ChatStream;
use crate::types::{ChatRequest, ModelVariant};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;
use crate::utils::streaming::StreamFactory;

use super::convert::{GEMINI_MODELS, build_request_body};
use super::streaming::GeminiEventConverter;
use super::types::GenerateContentRequest;
use super::{API_KEY_ENV, DEFAULT_BASE_URL};

/// Gemini client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key, DEFAULT_BASE_URL))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Read the key from `GEMINI_API_KEY`.
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

    pub async fn build_request_body(
        &self,
        request: &ChatRequest,
        variant: &ModelVariant,
    ) -> Result<GenerateContentRequest, LlmError> {
        build_request_body(&self.http_client, request, *variant)
            .await
            .map_err(|e| e.for_provider("gemini"))
    }

    fn stream_url(&self, model: &str) -> String {
        join_url(
            &self.config.base_url,
            &format!("/v1beta/models/{model}:streamGenerateContent?alt=sse"),
        )
    }
}

#[async_trait]
impl ChatStreamProvider for GeminiClient {
    type Selector = ModelVariant;

    fn provider_id(&self) -> &'static str {
        "gemini"
    }

    fn resolve_model(&self, _request: &ChatRequest, selector: &ModelVariant) -> String {
        GEMINI_MODELS.resolve(selector.magnitude()).to_string()
    }

    async fn chat_stream(
        &self,
        request: ChatRequest,
        selector: ModelVariant,
    ) -> Result<ChatStream, LlmError> {
        let body = self.build_request_body(&request, &selector).await?;
        let model = self.resolve_model(&request, &selector);
        let url = self.stream_url(&model);
        let headers = ProviderHeaders::gemini(self.config.api_key(), &self.config.http_config.headers)
            .map_err(|e| e.for_provider("gemini"))?;

        tracing::debug!(url = %url, model = %model, thinking = selector.reasoning_enabled(), "gemini chat stream");

        let request_builder = self.http_client.post(url).headers(headers).json(&body);
        StreamFactory::create_eventsource_stream(
            request_builder,
            GeminiEventConverter::new(),
            ReasoningMode::NativeField,
        )
        .await
    }
}
