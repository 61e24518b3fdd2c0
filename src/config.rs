//! Client configuration shared by every provider
//!
//! ```rust
//! use chatmux::config::ClientConfig;
//!
//! let config = ClientConfig::new("sk-test", "https://api.openai.com")
//!     .with_base_url("http://localhost:8080")
//!     .with_header("X-Title", "my-app");
//! assert_eq!(config.base_url, "http://localhost:8080");
//! ```

use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;
use crate::types::HttpConfig;

/// API key, endpoint and extra headers for one provider client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub http_config: HttpConfig,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: base_url.into(),
            http_config: HttpConfig::default(),
        }
    }

    /// Read the API key from `var`.
    pub fn from_env(var: &str, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(var)
            .map_err(|_| LlmError::Configuration(format!("{var} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration(format!("{var} is empty")));
        }
        Ok(Self::new(api_key, base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_config.headers.insert(name.into(), value.into());
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}
