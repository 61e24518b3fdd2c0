//! Error Handling Module
//!
//! Two failure families reach the caller:
//! - `LlmError::Provider` when a call fails before a stream exists (transport,
//!   non-success status, vendor error payload, image fetch)
//! - `LlmError::Stream` when a stream that was already returned breaks
//!
//! Nothing is retried. Every `reqwest`/`serde_json` failure is wrapped so raw
//! vendor error types never cross the crate boundary.
//!
//! # Example
//!
//! ```rust
//! use chatmux::error::LlmError;
//!
//! let error = LlmError::from_status("openai", 401, "Incorrect API key provided");
//! assert!(error.is_provider_error());
//! assert_eq!(error.provider_id(), Some("openai"));
//! assert_eq!(error.status_code(), Some(401));
//! ```

use thiserror::Error;

/// Errors produced by provider calls and stream normalization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// The vendor call failed before any stream was handed to the caller.
    #[error("{provider} call failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Provider {
        provider: &'static str,
        message: String,
        status: Option<u16>,
    },

    /// A stream broke after the call succeeded.
    #[error("{provider} stream error: {message}")]
    Stream {
        provider: &'static str,
        message: String,
    },

    /// Caller input that cannot be turned into a request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or unusable client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Transport or vendor failure without an HTTP status.
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            status: None,
        }
    }

    /// Non-success HTTP status returned by the vendor.
    pub fn from_status(provider: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: body.into(),
            status: Some(status),
        }
    }

    /// Failure while consuming an open stream.
    pub fn stream(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Stream {
            provider,
            message: message.into(),
        }
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    pub fn is_stream_error(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }

    /// Vendor that produced the error, if any.
    pub fn provider_id(&self) -> Option<&'static str> {
        match self {
            Self::Provider { provider, .. } | Self::Stream { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }

    /// Re-tag an error raised by a shared helper with the calling vendor.
    ///
    /// Image fetching and input validation run before the vendor request is
    /// sent, so their failures belong to the vendor whose call they abort.
    pub fn for_provider(self, provider: &'static str) -> Self {
        match self {
            Self::Provider {
                message, status, ..
            } => Self::Provider {
                provider,
                message,
                status,
            },
            Self::Stream { message, .. } => Self::Stream { provider, message },
            Self::InvalidInput(message) | Self::Configuration(message) => Self::Provider {
                provider,
                message,
                status: None,
            },
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LlmError>;
