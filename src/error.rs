use std::fmt;
use std::time::Duration;

/// Coarse failure category a UI can branch on.
///
/// `Network` means the request never produced a response (retry makes
/// sense), `Http` means the server answered with an error status, and
/// `Shape` means the server answered 2xx with a body we could not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Http,
    Shape,
}

/// Why a 2xx response body could not be turned into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Body was not valid JSON.
    NotJson(String),
    /// JSON matched none of the known envelopes. Carries the top-level keys seen.
    UnrecognizedEnvelope { keys: Vec<String> },
    /// Envelope matched but an item did not decode into the record type.
    InvalidItem { index: usize, reason: String },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::NotJson(msg) => write!(f, "response body is not JSON: {}", msg),
            ShapeError::UnrecognizedEnvelope { keys } if keys.is_empty() => {
                write!(f, "unrecognized response envelope")
            }
            ShapeError::UnrecognizedEnvelope { keys } => {
                write!(f, "unrecognized response envelope (keys: {})", keys.join(", "))
            }
            ShapeError::InvalidItem { index, reason } => {
                write!(f, "item {} failed to decode: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Error type for a single collection fetch.
///
/// Every variant is caught at the store boundary and kept in
/// [`CollectionState::error`](crate::CollectionState); nothing is thrown
/// past the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete (connection refused, DNS, reset).
    Transport(String),
    /// The request hit the configured ceiling.
    Timeout(Duration),
    /// The server answered with a non-2xx status.
    Status { status: u16, message: String },
    /// The server answered 2xx but the body was unusable.
    Shape(ShapeError),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => ErrorKind::Network,
            FetchError::Status { .. } => ErrorKind::Http,
            FetchError::Shape(_) => ErrorKind::Shape,
        }
    }

    /// True when repeating the same request has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Transport(_) | FetchError::Timeout(_) => true,
            FetchError::Shape(_) => false,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "network error: {}", msg),
            FetchError::Timeout(after) => {
                write!(f, "request timed out after {}ms", after.as_millis())
            }
            FetchError::Status { status, message } if message.is_empty() => {
                write!(f, "server responded with status {}", status)
            }
            FetchError::Status { status, message } => {
                write!(f, "server responded with status {}: {}", status, message)
            }
            FetchError::Shape(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for FetchError {
    fn from(err: ShapeError) -> Self {
        FetchError::Shape(err)
    }
}

/// Error type for loading a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    Invalid { key: String, value: String, reason: String },
    /// The base URL is empty or not http(s).
    BaseUrl(String),
    /// The HTTP client could not be constructed.
    Client(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "invalid value {:?} for {}: {}", value, key, reason)
            }
            ConfigError::BaseUrl(url) => write!(f, "invalid base url: {:?}", url),
            ConfigError::Client(msg) => write!(f, "failed to build http client: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
