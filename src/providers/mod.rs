//! Provider call adapters
//!
//! One client per vendor family. Each one turns a [`ChatRequest`] plus a model
//! selector into the vendor's request body, opens the streaming call, and
//! hands the raw stream to the normalizer. Clients hold no per-call state and
//! can be cloned and used from several tasks at once.
//!
//! None of them retry, rate-limit, cache or time out; those are left to the
//! caller.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::stream::{ChatStream, ChatStreamHandle};
use crate::types::ChatRequest;
use crate::utils::cancel::with_cancel;

#[cfg(feature = "anthropic")]
pub mod anthropic;
#[cfg(feature = "google")]
pub mod gemini;
#[cfg(feature = "openai")]
pub mod openai;
pub mod openai_compatible;
#[cfg(feature = "openrouter")]
pub mod openrouter;
#[cfg(feature = "xai")]
pub mod xai;

/// Streaming chat entry point shared by every provider.
#[async_trait]
pub trait ChatStreamProvider: Send + Sync {
    /// Model selector accepted by this provider
    type Selector: Send + Sync + 'static;

    /// Provider identifier used in errors and logs
    fn provider_id(&self) -> &'static str;

    /// Concrete model id for this request and selector.
    fn resolve_model(&self, request: &ChatRequest, selector: &Self::Selector) -> String;

    /// Build the request body, open the stream and normalize it.
    ///
    /// Fails with [`LlmError::Provider`] before any stream exists when the
    /// call cannot be made or the vendor answers with a non-success status.
    async fn chat_stream(
        &self,
        request: ChatRequest,
        selector: Self::Selector,
    ) -> Result<ChatStream, LlmError>;

    /// Same as [`chat_stream`](Self::chat_stream), with a cancel handle.
    async fn chat_stream_with_cancel(
        &self,
        request: ChatRequest,
        selector: Self::Selector,
    ) -> Result<ChatStreamHandle, LlmError> {
        let stream = self.chat_stream(request, selector).await?;
        Ok(with_cancel(stream))
    }
}
