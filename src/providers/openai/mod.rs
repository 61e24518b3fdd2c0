//! OpenAI chat completions

pub mod client;
pub mod transformers;

pub use client::OpenAiClient;
pub use transformers::{OPENAI_MODELS, OPENAI_REASONING_MODELS, select_model};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
