//! xAI (Grok) chat completions
//!
//! OpenAI-compatible wire format; reasoning arrives in
//! `delta.reasoning_content`.

pub mod client;
pub mod transformers;

pub use client::XaiClient;
pub use transformers::{XAI_MODELS, XAI_REASONING_MODELS, XAI_VISION_MODEL, select_model};

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai";
pub const API_KEY_ENV: &str = "XAI_API_KEY";
