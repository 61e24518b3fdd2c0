//! Anthropic Messages API
//!
//! Images are fetched and sent inline; extended thinking arrives as
//! `thinking_delta` blocks.

pub mod client;
pub mod streaming;
pub mod transformers;

pub use client::AnthropicClient;
pub use streaming::AnthropicEventConverter;
pub use transformers::{ANTHROPIC_MODELS, thinking_budget};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
