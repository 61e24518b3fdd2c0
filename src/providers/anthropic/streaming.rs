//! Anthropic streaming implementation using eventsource-stream
//!
//! Only `content_block_delta` carries text: `text_delta` is answer text and
//! `thinking_delta` is reasoning. An `error` event fails the stream.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::error::LlmError;
use crate::types::RawDelta;
use crate::utils::streaming::SseEventConverter;

/// Anthropic stream event structure
#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamEvent {
    r#type: String,
    #[serde(default)]
    delta: Option<AnthropicDelta>,
    #[serde(default)]
    error: Option<AnthropicError>,
}

/// Delta subtypes: text_delta, thinking_delta, signature_delta, input_json_delta
#[derive(Debug, Clone, Deserialize)]
struct AnthropicDelta {
    #[serde(rename = "type", default)]
    delta_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thinking: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicError {
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Anthropic event converter
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicEventConverter;

impl AnthropicEventConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_anthropic_event(&self, event: AnthropicStreamEvent) -> Result<Vec<RawDelta>, LlmError> {
        match event.r#type.as_str() {
            "content_block_delta" => {
                let Some(delta) = event.delta else {
                    return Ok(Vec::new());
                };
                let raw = match delta.delta_type.as_deref() {
                    Some("thinking_delta") => RawDelta {
                        content: None,
                        reasoning: delta.thinking,
                    },
                    _ => RawDelta {
                        content: delta.text,
                        reasoning: delta.thinking,
                    },
                };
                Ok(if raw.is_empty() { Vec::new() } else { vec![raw] })
            }
            "error" => {
                let error = event.error.unwrap_or(AnthropicError {
                    error_type: None,
                    message: None,
                });
                tracing::warn!(error_type = ?error.error_type, "anthropic stream error event");
                let message = match (error.error_type, error.message) {
                    (Some(kind), Some(message)) => format!("{kind}: {message}"),
                    (None, Some(message)) => message,
                    (Some(kind), None) => kind,
                    (None, None) => "stream reported an error".to_string(),
                };
                Err(LlmError::provider("anthropic", message))
            }
            // message_start, content_block_start/stop, message_delta, message_stop, ping
            _ => Ok(Vec::new()),
        }
    }
}

impl SseEventConverter for AnthropicEventConverter {
    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn convert_event(&self, event: &Event) -> Result<Vec<RawDelta>, LlmError> {
        let parsed: AnthropicStreamEvent = serde_json::from_str(&event.data).map_err(|e| {
            LlmError::stream("anthropic", format!("Failed to parse Anthropic event: {e}"))
        })?;
        self.convert_anthropic_event(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(data: &str) -> Event {
        Event {
            event: String::new(),
            data: data.to_string(),
            id: String::new(),
            retry: None,
        }
    }

    #[test]
    fn test_text_and_thinking_deltas() {
        let converter = AnthropicEventConverter::new();
        let text = converter
            .convert_event(&event(
                r#"{"type":"content_block_delta","index":1,"delta":{"type":"text_delta","text":"Hello"}}"#,
            ))
            .unwrap();
        assert_eq!(text, vec![RawDelta::content("Hello")]);

        let thinking = converter
            .convert_event(&event(
                r#"{"type":"content_block_delta","index":0,"delta":{"type":"thinking_delta","thinking":"Let me see"}}"#,
            ))
            .unwrap();
        assert_eq!(thinking, vec![RawDelta::reasoning("Let me see")]);
    }

    #[test]
    fn test_bookkeeping_events_are_silent() {
        let converter = AnthropicEventConverter::new();
        for data in [
            r#"{"type":"message_start","message":{"id":"msg_1","model":"claude-sonnet-4-0"}}"#,
            r#"{"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}"#,
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"signature_delta","signature":"abc"}}"#,
            r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":3}}"#,
            r#"{"type":"message_stop"}"#,
            r#"{"type":"ping"}"#,
        ] {
            assert!(converter.convert_event(&event(data)).unwrap().is_empty(), "{data}");
        }
    }

    #[test]
    fn test_error_event() {
        let err = AnthropicEventConverter::new()
            .convert_event(&event(
                r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
            ))
            .unwrap_err();
        assert!(err.is_provider_error());
        assert_eq!(err.provider_id(), Some("anthropic"));
        assert!(err.to_string().contains("overloaded_error: Overloaded"));
    }

    #[test]
    fn test_malformed_event_is_stream_error() {
        let err = AnthropicEventConverter::new()
            .convert_event(&event("{oops"))
            .unwrap_err();
        assert!(err.is_stream_error());
    }
}
