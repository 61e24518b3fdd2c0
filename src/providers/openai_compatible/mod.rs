//! OpenAI-compatible chat completions
//!
//! xAI, OpenAI and OpenRouter all speak the `/chat/completions` wire format.
//! This module holds the pieces they share: message conversion with
//! URL-referenced images and the streaming chunk parser.

pub mod streaming;
pub mod transformers;

pub use streaming::{OpenAiCompatibleEventConverter, OpenAiCompatibleStreamEvent, extract_deltas};
pub use transformers::{CompatChatBody, convert_messages};
