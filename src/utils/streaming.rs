//! Common Streaming Utilities
//!
//! Shared plumbing between provider clients and the normalizer: sending the
//! streaming request, rejecting non-success responses before any stream is
//! handed out, SSE framing via eventsource-stream, and event building.

use crate::error::LlmError;
use crate::normalizer::{ReasoningMode, normalize};
use crate::stream::{ChatStream, ChatStreamEvent};
use crate::types::RawDelta;
use crate::utils::sse_lines;
use eventsource_stream::{Event, Eventsource};
use futures_util::StreamExt;

/// Converts one provider SSE event into raw deltas.
///
/// Implementations are stateless; per-stream state lives in the normalizer.
pub trait SseEventConverter: Send + Sync {
    /// Provider identifier used in errors and logs
    fn provider_id(&self) -> &'static str;

    /// Convert an SSE event to zero or more raw deltas. An `Err` ends the stream.
    fn convert_event(&self, event: &Event) -> Result<Vec<RawDelta>, LlmError>;
}

/// Stream factory for creating provider-specific streams
pub struct StreamFactory;

impl StreamFactory {
    /// Send a streaming request and return the response only if its status is
    /// a success. The error body is read and attached otherwise.
    pub async fn send(
        provider: &'static str,
        request_builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, LlmError> {
        let response = request_builder
            .send()
            .await
            .map_err(|e| LlmError::provider(provider, format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!(provider, status = status.as_u16(), "non-success response");
            return Err(LlmError::from_status(provider, status.as_u16(), error_text));
        }
        Ok(response)
    }

    /// Create a chat stream using eventsource-stream
    ///
    /// eventsource-stream handles UTF-8 boundaries, line buffering and SSE
    /// framing. A `[DONE]` payload ends the stream.
    pub async fn create_eventsource_stream<C>(
        request_builder: reqwest::RequestBuilder,
        converter: C,
        mode: ReasoningMode,
    ) -> Result<ChatStream, LlmError>
    where
        C: SseEventConverter + 'static,
    {
        let provider = converter.provider_id();
        let response = Self::send(provider, request_builder).await?;
        let byte_stream = response.bytes_stream();
        Ok(Self::from_sse_bytes(byte_stream, converter, mode))
    }

    /// Normalize an SSE byte stream that is already open.
    pub fn from_sse_bytes<S, B, E, C>(byte_stream: S, converter: C, mode: ReasoningMode) -> ChatStream
    where
        S: futures::Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
        C: SseEventConverter + 'static,
    {
        let provider = converter.provider_id();
        let raw = async_stream::stream! {
            let mut events = Box::pin(byte_stream.eventsource());
            while let Some(item) = events.next().await {
                let event = match item {
                    Ok(event) => event,
                    Err(e) => {
                        yield Err(LlmError::stream(provider, format!("SSE parsing error: {e}")));
                        return;
                    }
                };

                let data = event.data.trim();
                if data == "[DONE]" {
                    return;
                }
                if data.is_empty() {
                    continue;
                }

                tracing::trace!(provider, data = %event.data, "sse event");
                match converter.convert_event(&event) {
                    Ok(deltas) => {
                        for delta in deltas {
                            yield Ok(delta);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };
        normalize(raw, mode)
    }

    /// Create a chat stream from a raw `data:` line stream.
    ///
    /// Used by routes whose payload we parse line by line ourselves: malformed
    /// JSON lines are skipped and `data: [DONE]` ends the stream.
    pub async fn create_line_stream<F>(
        provider: &'static str,
        request_builder: reqwest::RequestBuilder,
        extract: F,
        mode: ReasoningMode,
    ) -> Result<ChatStream, LlmError>
    where
        F: Fn(serde_json::Value) -> Result<Vec<RawDelta>, LlmError> + Send + 'static,
    {
        let response = Self::send(provider, request_builder).await?;
        Ok(Self::from_line_bytes(
            provider,
            response.bytes_stream(),
            extract,
            mode,
        ))
    }

    /// Normalize a `data:` line byte stream that is already open.
    pub fn from_line_bytes<S, B, E, F>(
        provider: &'static str,
        byte_stream: S,
        extract: F,
        mode: ReasoningMode,
    ) -> ChatStream
    where
        S: futures::Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
        F: Fn(serde_json::Value) -> Result<Vec<RawDelta>, LlmError> + Send + 'static,
    {
        let raw = async_stream::stream! {
            let mut chunks = Box::pin(sse_lines::data_stream(provider, byte_stream));
            while let Some(item) = chunks.next().await {
                match item.and_then(&extract) {
                    Ok(deltas) => {
                        for delta in deltas {
                            yield Ok(delta);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };
        normalize(raw, mode)
    }
}

/// Helper utilities for efficient event building
pub struct EventBuilder {
    events: Vec<ChatStreamEvent>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(2), // a chunk yields at most a reasoning and a content event
        }
    }

    /// Add a ContentDelta event (only if text is not empty)
    pub fn add_content_delta(mut self, text: String) -> Self {
        if !text.is_empty() {
            self.events.push(ChatStreamEvent::ContentDelta { text });
        }
        self
    }

    /// Add a ReasoningDelta event (only if text is not empty)
    pub fn add_reasoning_delta(mut self, text: String) -> Self {
        if !text.is_empty() {
            self.events.push(ChatStreamEvent::ReasoningDelta { text });
        }
        self
    }

    /// Build the events vector
    pub fn build(self) -> Vec<ChatStreamEvent> {
        self.events
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
