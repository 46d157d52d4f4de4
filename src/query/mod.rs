//! Query parameters a collection fetch is built from.
//!
//! A [`ListQuery`] is an immutable snapshot taken from store state at the
//! moment a fetch starts. The fetch adapter only ever sees the snapshot, so
//! later state mutations cannot change what an in-flight request asked for.

mod filters;
mod sort;

pub use filters::{keys, FilterValue, Filters};
pub use sort::{Sort, SortOrder};

use serde::{Deserialize, Serialize};

/// Snapshot of everything that determines which page the server returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filters: Filters,
    pub sort: Sort,
    /// 1-based page number.
    pub page: u32,
    /// Page size, always > 0.
    pub limit: u32,
}

impl ListQuery {
    pub fn new(filters: Filters, sort: Sort, page: u32, limit: u32) -> Self {
        Self {
            filters,
            sort,
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Free-text search, if any.
    pub fn search(&self) -> Option<&str> {
        self.filters.text(keys::SEARCH)
    }
}

/// Join list entries the way the backend expects (`a,b,c`).
pub(crate) fn join_list(items: &[&str]) -> String {
    items.join(",")
}
