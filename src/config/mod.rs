//! Client configuration.
//!
//! Defaults match the web client: API under `http://localhost:8000/api/v1`,
//! an 8 second request ceiling and a 400 ms search debounce window.
//!
//! ```ignore
//! let config = ClientConfig::from_env()?
//!     .with_bearer_token(token)
//!     .with_search_debounce(Duration::from_millis(300));
//! ```

mod env;

pub use env::{
    ENV_API_URL, ENV_API_TOKEN, ENV_PAGE_LIMIT, ENV_REQUEST_TIMEOUT_MS, ENV_SEARCH_DEBOUNCE_MS,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Settings shared by every store built from the same root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `https://example.org/api/v1`.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub bearer_token: Option<String>,
    /// Ceiling for a single fetch.
    #[serde(with = "millis")]
    pub request_timeout: Duration,
    /// Coalescing window for free-text search.
    #[serde(with = "millis")]
    pub search_debounce: Duration,
    /// Page size override for every store; endpoint defaults apply when unset.
    pub page_limit: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            page_limit: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        env::load(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        env::load(lookup)
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce = window;
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Check the values a transport relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "request_timeout".into(),
                value: "0".into(),
                reason: "request timeout must be positive".into(),
            });
        }
        if self.page_limit == Some(0) {
            return Err(ConfigError::Invalid {
                key: "page_limit".into(),
                value: "0".into(),
                reason: "page limit must be positive".into(),
            });
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
