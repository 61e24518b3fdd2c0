//! OpenRouter Client Implementation

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::error::LlmError;
use crate::normalizer::ReasoningMode;
use crate::providers::ChatStreamProvider;
use crate::providers::openai_compatible::CompatChatBody;
use crate::stream::ChatStream;
use crate::types::{ChatRequest, RoutedModel};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;
use crate::utils::streaming::StreamFactory;

use super::streaming::{PROVIDER_ID, extract_chunk};
use super::{API_KEY_ENV, DEFAULT_BASE_URL};

/// OpenRouter client
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key, DEFAULT_BASE_URL))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Read the key from `OPENROUTER_API_KEY`.
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

    /// OpenRouter reads `HTTP-Referer` and `X-Title` for app attribution.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_header(name, value);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_request_body(&self, request: &ChatRequest, model: &RoutedModel) -> Value {
        let mut body = CompatChatBody::new(model.name.clone()).build(request);
        body["include_reasoning"] = json!(model.reasoning);
        body
    }
}

#[async_trait]
impl ChatStreamProvider for OpenRouterClient {
    type Selector = RoutedModel;

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn resolve_model(&self, _request: &ChatRequest, selector: &RoutedModel) -> String {
        selector.name.clone()
    }

    async fn chat_stream(
        &self,
        request: ChatRequest,
        selector: RoutedModel,
    ) -> Result<ChatStream, LlmError> {
        let body = self.build_request_body(&request, &selector);
        let url = join_url(&self.config.base_url, "/api/v1/chat/completions");
        let headers = ProviderHeaders::bearer(self.config.api_key(), &self.config.http_config.headers)
            .map_err(|e| e.for_provider(PROVIDER_ID))?;

        tracing::debug!(
            url = %url,
            model = %selector.name,
            include_reasoning = selector.reasoning,
            "openrouter chat stream"
        );

        let request_builder = self.http_client.post(url).headers(headers).json(&body);
        StreamFactory::create_line_stream(
            PROVIDER_ID,
            request_builder,
            extract_chunk,
            ReasoningMode::inline_think(),
        )
        .await
    }
}
