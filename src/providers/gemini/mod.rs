//! Google Gemini `streamGenerateContent`

pub mod client;
pub mod convert;
pub mod streaming;
pub mod types;

pub use client::GeminiClient;
pub use convert::GEMINI_MODELS;
pub use streaming::GeminiEventConverter;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
