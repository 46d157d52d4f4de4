//! Response envelope normalization.
//!
//! The backend does not wrap its collection responses uniformly. Each body is
//! parsed into exactly one [`Envelope`] variant, tried in a fixed order:
//!
//! ```text
//! [ ... ]                                              -> Envelope::Bare
//! { "data": [ ... ] }                                  -> Envelope::Data
//! { "data": { "<collection>": [ ... ], total, ... } }  -> Envelope::Collection
//! { "message": { "leaderboard": [ ... ], "pagination": { ... } } }
//!                                                      -> Envelope::Leaderboard
//! ```
//!
//! Anything else is a [`ShapeError::UnrecognizedEnvelope`].

mod meta;

pub use meta::PageMeta;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ShapeError;
use crate::pagination::Pagination;

/// Key under `message` holding leaderboard rows.
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// One page of decoded records plus normalized pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// A recognized response envelope, items still undecoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Bare JSON array; no pagination metadata.
    Bare(Vec<Value>),
    /// `{ "data": [...] }`; no pagination metadata.
    Data(Vec<Value>),
    /// `{ "data": { "<collection>": [...], ... } }`.
    Collection { items: Vec<Value>, meta: PageMeta },
    /// `{ "message": { "leaderboard": [...], "pagination": {...} } }`.
    Leaderboard { items: Vec<Value>, meta: PageMeta },
}

impl Envelope {
    /// Classify `body`. `collection_key` names the array inside `data`
    /// (`"projects"`, `"users"`, ...).
    pub fn parse(body: Value, collection_key: &str) -> Result<Self, ShapeError> {
        let mut object = match body {
            Value::Array(items) => return Ok(Envelope::Bare(items)),
            Value::Object(object) => object,
            _ => return Err(ShapeError::UnrecognizedEnvelope { keys: Vec::new() }),
        };

        match object.remove("data") {
            Some(Value::Array(items)) => return Ok(Envelope::Data(items)),
            Some(Value::Object(mut data)) => {
                if let Some(Value::Array(items)) = data.remove(collection_key) {
                    let meta = PageMeta::from_container(&data);
                    return Ok(Envelope::Collection { items, meta });
                }
                object.insert("data".to_string(), Value::Object(data));
            }
            Some(other) => {
                object.insert("data".to_string(), other);
            }
            None => {}
        }

        if let Some(Value::Object(message)) = object.get_mut("message") {
            if let Some(Value::Array(items)) = message.remove(LEADERBOARD_KEY) {
                let meta = PageMeta::from_container(message);
                return Ok(Envelope::Leaderboard { items, meta });
            }
        }

        Err(unrecognized(&object))
    }

    /// Decode items and settle pagination.
    ///
    /// Envelopes without metadata are treated as the whole collection on a
    /// single page. Otherwise missing numbers fall back to the request
    /// (`requested_page`, `requested_limit`) or are derived from the count.
    pub fn into_page<T: DeserializeOwned>(
        self,
        requested_page: u32,
        requested_limit: u32,
    ) -> Result<Page<T>, ShapeError> {
        let (raw, meta) = match self {
            Envelope::Bare(items) | Envelope::Data(items) => (items, None),
            Envelope::Collection { items, meta } | Envelope::Leaderboard { items, meta } => {
                (items, Some(meta))
            }
        };

        let count = raw.len() as u64;
        let items = decode_items(raw)?;

        let pagination = match meta {
            None => {
                let limit = requested_limit.max(u32::try_from(count).unwrap_or(u32::MAX));
                Pagination::normalized(1, 1, count, limit)
            }
            Some(meta) => {
                let limit = meta.limit.unwrap_or(requested_limit);
                let total_count = meta.total_count.unwrap_or(count);
                let current = meta.current_page.unwrap_or(requested_page);
                match meta.total_pages {
                    Some(total_pages) => {
                        Pagination::normalized(current, total_pages, total_count, limit)
                    }
                    None => Pagination::from_count(current, total_count, limit),
                }
            }
        };

        Ok(Page { items, pagination })
    }
}

/// Parse and decode in one step.
pub fn normalize<T: DeserializeOwned>(
    body: Value,
    collection_key: &str,
    requested_page: u32,
    requested_limit: u32,
) -> Result<Page<T>, ShapeError> {
    Envelope::parse(body, collection_key)?.into_page(requested_page, requested_limit)
}

fn decode_items<T: DeserializeOwned>(raw: Vec<Value>) -> Result<Vec<T>, ShapeError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| ShapeError::InvalidItem {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn unrecognized(object: &Map<String, Value>) -> ShapeError {
    ShapeError::UnrecognizedEnvelope {
        keys: object.keys().cloned().collect(),
    }
}
