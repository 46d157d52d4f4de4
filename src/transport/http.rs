//! HTTP transport backed by reqwest.
//!
//! Requires the `http` feature. Sends credentials the way the web client
//! does: a cookie jar for the session cookie and an optional bearer token.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;

use super::{error_message, GetRequest, Transport};
use crate::config::ClientConfig;
use crate::error::{ConfigError, FetchError, ShapeError};

/// Transport issuing real GET requests against `<base_url>/<path>`.
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Build a transport from `config`: base URL, bearer token, timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.bearer_token.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ConfigError::Client(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let mut transport = Self::with_client(client, &config.base_url);
        transport.timeout = Some(config.request_timeout);
        Ok(transport)
    }

    /// Use an existing client (custom TLS, proxies, shared pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: GetRequest) -> impl Future<Output = Result<Value, FetchError>> + Send {
        let url = self.url_for(&request.path);
        let builder = self.client.get(&url).query(&request.query);
        let timeout = self.timeout;

        async move {
            tracing::debug!(url = %url, params = ?request.query, "GET");

            let response = builder.send().await.map_err(|e| transport_error(e, timeout))?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let bytes = response.bytes().await.map_err(|e| transport_error(e, timeout))?;
            serde_json::from_slice(&bytes)
                .map_err(|e| FetchError::Shape(ShapeError::NotJson(e.to_string())))
        }
    }
}

fn transport_error(err: reqwest::Error, timeout: Option<Duration>) -> FetchError {
    match timeout {
        Some(after) if err.is_timeout() => FetchError::Timeout(after),
        _ => FetchError::Transport(err.to_string()),
    }
}
