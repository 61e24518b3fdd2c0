//! OpenAI-compatible streaming chunks
//!
//! Every `/chat/completions` provider streams the same chunk shape; they
//! differ in which field carries reasoning text (`reasoning_content`,
//! `reasoning` or `thinking`). All three are read here.

use eventsource_stream::Event;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LlmError;
use crate::types::RawDelta;
use crate::utils::streaming::SseEventConverter;

/// OpenAI-compatible stream event structure
#[derive(Debug, Deserialize)]
pub struct OpenAiCompatibleStreamEvent {
    pub id: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    pub error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    pub index: Option<u32>,
    pub delta: Option<StreamDelta>,
    pub finish_reason: Option<String>,
}

/// Stream delta with the provider-specific reasoning fields
#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    pub role: Option<String>,
    pub content: Option<String>,
    pub reasoning_content: Option<String>,
    pub reasoning: Option<String>,
    pub thinking: Option<String>,
}

impl StreamDelta {
    fn into_raw(self) -> RawDelta {
        RawDelta {
            content: self.content,
            reasoning: self.reasoning_content.or(self.reasoning).or(self.thinking),
        }
    }
}

/// In-stream error payload (`{"error": {"message": ..., "code": ...}}`)
#[derive(Debug, Deserialize)]
pub struct StreamError {
    pub message: Option<String>,
    pub code: Option<Value>,
}

/// Reduce one chunk to raw deltas, one per choice.
///
/// A chunk carrying an `error` object fails the stream with a provider error.
pub fn extract_deltas(provider: &'static str, chunk: Value) -> Result<Vec<RawDelta>, LlmError> {
    let event: OpenAiCompatibleStreamEvent = serde_json::from_value(chunk)
        .map_err(|e| LlmError::stream(provider, format!("Unexpected chunk shape: {e}")))?;

    if let Some(error) = event.error {
        let status = error
            .code
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok());
        return Err(LlmError::Provider {
            provider,
            message: error
                .message
                .unwrap_or_else(|| "stream reported an error".to_string()),
            status,
        });
    }

    Ok(event
        .choices
        .into_iter()
        .filter_map(|choice| choice.delta)
        .map(StreamDelta::into_raw)
        .filter(|delta| !delta.is_empty())
        .collect())
}

/// SSE converter shared by xAI and OpenAI.
#[derive(Debug, Clone, Copy)]
pub struct OpenAiCompatibleEventConverter {
    provider: &'static str,
}

impl OpenAiCompatibleEventConverter {
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }
}

impl SseEventConverter for OpenAiCompatibleEventConverter {
    fn provider_id(&self) -> &'static str {
        self.provider
    }

    fn convert_event(&self, event: &Event) -> Result<Vec<RawDelta>, LlmError> {
        let chunk: Value = serde_json::from_str(&event.data).map_err(|e| {
            LlmError::stream(self.provider, format!("Failed to parse SSE event: {e}"))
        })?;
        extract_deltas(self.provider, chunk)
    }
}
