//! Per-provider authentication headers

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

use crate::error::LlmError;

/// Anthropic Messages API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct ProviderHeaders;

impl ProviderHeaders {
    /// `Authorization: Bearer` (OpenAI, xAI, OpenRouter)
    pub fn bearer(
        api_key: &str,
        custom: &HashMap<String, String>,
    ) -> Result<HeaderMap, LlmError> {
        let mut headers = Self::json();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| LlmError::Configuration(format!("Invalid API key: {e}")))?,
        );
        Self::merge(headers, custom)
    }

    /// `x-api-key` plus `anthropic-version`
    pub fn anthropic(
        api_key: &str,
        custom: &HashMap<String, String>,
    ) -> Result<HeaderMap, LlmError> {
        let mut headers = Self::json();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| LlmError::Configuration(format!("Invalid API key: {e}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        Self::merge(headers, custom)
    }

    /// `x-goog-api-key`
    pub fn gemini(api_key: &str, custom: &HashMap<String, String>) -> Result<HeaderMap, LlmError> {
        let mut headers = Self::json();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| LlmError::Configuration(format!("Invalid API key: {e}")))?,
        );
        Self::merge(headers, custom)
    }

    fn json() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn merge(
        mut headers: HeaderMap,
        custom: &HashMap<String, String>,
    ) -> Result<HeaderMap, LlmError> {
        for (name, value) in custom {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LlmError::Configuration(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| LlmError::Configuration(format!("Invalid header value: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
