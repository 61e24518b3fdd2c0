//! # chatmux - one streaming chat interface over several vendors
//!
//! Send one request shape (history, system instruction, model selector,
//! token and temperature controls) to Anthropic, Gemini, xAI, OpenAI or
//! OpenRouter and get back the same lazy stream of content and reasoning
//! deltas, whichever vendor answered.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmux::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnthropicClient::from_env()?;
//!     let request = ChatRequest::new(messages![user!("Explain SSE in one line")])
//!         .with_system("Answer tersely.")
//!         .with_max_tokens(2048);
//!
//!     // negative selector: variant 1 with extended thinking
//!     let mut stream = client.chat_stream(request, ModelVariant(-1)).await?;
//!     while let Some(event) = stream.next().await {
//!         match event? {
//!             ChatStreamEvent::ReasoningDelta { text } => eprint!("{text}"),
//!             ChatStreamEvent::ContentDelta { text } => print!("{text}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Caller responsibilities
//!
//! The crate does not retry, rate-limit, cache, apply backpressure or time
//! out. Wrap calls in `tokio::time::timeout` or a retry layer as needed; a
//! stream dropped early (or cancelled through
//! [`ChatStreamHandle`](stream::ChatStreamHandle)) releases its HTTP body.

pub mod config;
pub mod error;
mod macros;
pub mod normalizer;
pub mod providers;
pub mod stream;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use error::LlmError;
pub use normalizer::{ReasoningMode, StreamNormalizer, ThinkTags};
pub use providers::ChatStreamProvider;
pub use stream::{ChatStream, ChatStreamHandle};
pub use types::{
    ChatMessage, ChatRequest, ChatStreamEvent, ImageInput, MessageRole, ModelVariant, RawDelta,
    RoutedModel, SystemBlock, SystemInstruction,
};

#[cfg(feature = "anthropic")]
pub use providers::anthropic::AnthropicClient;
#[cfg(feature = "google")]
pub use providers::gemini::GeminiClient;
#[cfg(feature = "openai")]
pub use providers::openai::OpenAiClient;
#[cfg(feature = "openrouter")]
pub use providers::openrouter::OpenRouterClient;
#[cfg(feature = "xai")]
pub use providers::xai::XaiClient;

pub mod prelude {
    pub use crate::config::ClientConfig;
    pub use crate::error::LlmError;
    pub use crate::providers::ChatStreamProvider;
    pub use crate::stream::{ChatStream, ChatStreamHandle};
    pub use crate::types::{
        ChatMessage, ChatRequest, ChatStreamEvent, ImageInput, MessageRole, ModelVariant,
        RoutedModel, SystemBlock, SystemInstruction,
    };
    pub use crate::utils::cancel::CancelHandle;
    pub use crate::{assistant, messages, system, user, user_with_image};

    #[cfg(feature = "anthropic")]
    pub use crate::providers::anthropic::AnthropicClient;
    #[cfg(feature = "google")]
    pub use crate::providers::gemini::GeminiClient;
    #[cfg(feature = "openai")]
    pub use crate::providers::openai::OpenAiClient;
    #[cfg(feature = "openrouter")]
    pub use crate::providers::openrouter::OpenRouterClient;
    #[cfg(feature = "xai")]
    pub use crate::providers::xai::XaiClient;
}
