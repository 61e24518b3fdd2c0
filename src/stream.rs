//! Core Streaming Types
//!
//! Defines the stream type every provider returns.

use futures::Stream;
use std::pin::Pin;

use crate::error::LlmError;

pub use crate::types::ChatStreamEvent;

/// Chat Stream - Main interface for streaming responses
///
/// A pinned, boxed, single-pass stream of canonical events. It ends when the
/// vendor stream ends; there is no terminal sentinel event. Dropping it early
/// drops the underlying HTTP body reader.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, LlmError>> + Send>>;

/// Chat stream with first-class cancellation handle
pub struct ChatStreamHandle {
    /// The underlying chat stream
    pub stream: ChatStream,
    /// Handle to cancel the stream
    pub cancel: crate::utils::cancel::CancelHandle,
}
