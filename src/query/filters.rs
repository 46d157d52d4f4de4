//! Filter values and the per-store filter map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known filter keys used by the bundled endpoints.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const TAGS: &str = "tags";
    pub const TECH: &str = "tech";
    pub const EXPERIENCE_LEVEL: &str = "experience_level";
    pub const HAS_GITHUB: &str = "hasGithub";
    pub const TIME_RANGE: &str = "timeRange";
    pub const LEADERBOARD_TYPE: &str = "leaderboardType";
}

/// A single filter value: free text, a list of strings, or a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::List(value)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(value: Vec<&str>) -> Self {
        FilterValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(value: [&str; N]) -> Self {
        FilterValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered map of filter key to value.
///
/// Ordered so two maps holding the same filters compare (and serialize)
/// identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters {
    values: BTreeMap<String, FilterValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Replace the value under `key`. Returns the previous value.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<FilterValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Text value under `key`, trimmed. `None` when absent, empty or not text.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FilterValue::Text(text)) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        }
    }

    /// Non-empty list entries under `key`. A text value counts as a one-item list.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.values.get(key) {
            Some(FilterValue::List(items)) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect(),
            Some(FilterValue::Text(text)) if !text.trim().is_empty() => vec![text.trim()],
            _ => Vec::new(),
        }
    }

    /// Flag under `key`; absent or non-flag values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FilterValue::Flag(true)))
    }
}
