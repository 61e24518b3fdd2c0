//! OpenRouter aggregator
//!
//! Routes to many upstream vendors through one OpenAI-compatible endpoint.
//! Some upstream models put their reasoning in `delta.reasoning`, others
//! inline it in `delta.content` between `<think>` tags, so content goes
//! through the tag-balance heuristic.
//!
//! ```rust,no_run
//! use chatmux::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn run() -> Result<(), LlmError> {
//! let client = OpenRouterClient::from_env()?;
//! let request = ChatRequest::new(vec![ChatMessage::user("Why is the sky blue?")]);
//! let model = RoutedModel::new("deepseek/deepseek-r1").with_reasoning(true);
//!
//! let mut stream = client.chat_stream(request, model).await?;
//! while let Some(event) = stream.next().await {
//!     match event? {
//!         ChatStreamEvent::ReasoningDelta { text } => eprint!("{text}"),
//!         ChatStreamEvent::ContentDelta { text } => print!("{text}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod streaming;

pub use client::OpenRouterClient;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai";
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
