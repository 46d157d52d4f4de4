//! Transport - the HTTP seam between the fetch adapter and the backend.
//!
//! A [`Transport`] performs one GET and returns the decoded JSON body of a
//! 2xx response. Non-2xx statuses, network failures and non-JSON bodies come
//! back as [`FetchError`]s.
//!
//! ```text
//! FetchAdapter ──GetRequest──▶ Transport ──▶ HttpTransport     (reqwest, "http" feature)
//!                                       └──▶ InMemoryTransport (tests, demos)
//! ```

mod in_memory;
#[cfg(feature = "http")]
mod http;

pub use in_memory::InMemoryTransport;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::future::Future;

use serde_json::Value;

use crate::error::FetchError;

/// A GET request relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Path without leading slash, e.g. `"project/get-all"`.
    pub path: String,
    /// Query-string pairs in order.
    pub query: Vec<(String, String)>,
}

impl GetRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// First value for `key`, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Issues GET requests against the collection API.
///
/// The returned future must be `Send` so stores can run fetches from
/// spawned tasks (the debounced search path does).
pub trait Transport: Send + Sync + 'static {
    fn get(&self, request: GetRequest) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message` and `error` (string or `{ "message": ... }`), falling
/// back to the raw text when it is short.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            match value.get(key) {
                Some(Value::String(msg)) => return msg.clone(),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(msg)) = inner.get("message") {
                        return msg.clone();
                    }
                }
                _ => {}
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.len() <= 200 {
        trimmed.to_string()
    } else {
        String::new()
    }
}
