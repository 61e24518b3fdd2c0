//! Gemini streaming implementation using eventsource-stream
//!
//! With `alt=sse` every event is a full `GenerateContentResponse` chunk.
//! Parts flagged `thought: true` are reasoning; other text parts are answer
//! text.

use eventsource_stream::Event;

use crate::error::LlmError;
use crate::types::RawDelta;
use crate::utils::streaming::SseEventConverter;

use super::types::GenerateContentChunk;

/// Gemini event converter
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiEventConverter;

impl GeminiEventConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_chunk(&self, chunk: GenerateContentChunk) -> Result<Vec<RawDelta>, LlmError> {
        if let Some(error) = chunk.error {
            tracing::warn!(status = ?error.status, "gemini stream error payload");
            return Err(LlmError::Provider {
                provider: "gemini",
                message: error
                    .message
                    .unwrap_or_else(|| "stream reported an error".to_string()),
                status: error.code,
            });
        }

        Ok(chunk
            .candidates
            .into_iter()
            .take(1)
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| {
                let text = part.text.filter(|t| !t.is_empty())?;
                Some(if part.thought.unwrap_or(false) {
                    RawDelta::reasoning(text)
                } else {
                    RawDelta::content(text)
                })
            })
            .collect())
    }
}

impl SseEventConverter for GeminiEventConverter {
    fn provider_id(&self) -> &'static str {
        "gemini"
    }

    fn convert_event(&self, event: &Event) -> Result<Vec<RawDelta>, LlmError> {
        let chunk: GenerateContentChunk = serde_json::from_str(&event.data).map_err(|e| {
            LlmError::stream("gemini", format!("Failed to parse Gemini event: {e}"))
        })?;
        self.convert_chunk(chunk)
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
    fn test_thought_parts_are_reasoning() {
        let deltas = GeminiEventConverter::new()
            .convert_event(&event(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"pondering","thought":true},{"text":"Answer"}]}}]}"#,
            ))
            .unwrap();
        assert_eq!(
            deltas,
            vec![RawDelta::reasoning("pondering"), RawDelta::content("Answer")]
        );
    }

    #[test]
    fn test_finish_chunk_without_text() {
        let deltas = GeminiEventConverter::new()
            .convert_event(&event(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":""}]},"finishReason":"STOP"}],"usageMetadata":{"totalTokenCount":9}}"#,
            ))
            .unwrap();
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_error_payload() {
        let err = GeminiEventConverter::new()
            .convert_event(&event(
                r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#,
            ))
            .unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.provider_id(), Some("gemini"));
    }
}
