//! Pagination metadata and its clamping rules.

use serde::Serialize;

/// Page position within a remote collection.
///
/// Always satisfies `1 <= current_page <= total_pages`,
/// `has_next_page == (current_page < total_pages)` and
/// `has_prev_page == (current_page > 1)`. The only way to build one is
/// through [`Pagination::normalized`] (or [`Pagination::first`]), which
/// enforces those rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    limit: u32,
    has_next_page: bool,
    has_prev_page: bool,
}

impl Pagination {
    /// Initial state before anything has been fetched.
    pub fn first(limit: u32) -> Self {
        Self::normalized(1, 1, 0, limit)
    }

    /// Build pagination from possibly inconsistent server numbers.
    ///
    /// `limit` is forced to at least 1, `total_pages` to at least 1, and
    /// `current_page` is clamped into `1..=total_pages`.
    pub fn normalized(current_page: u32, total_pages: u32, total_count: u64, limit: u32) -> Self {
        let limit = limit.max(1);
        let total_pages = total_pages.max(1);
        let current_page = current_page.clamp(1, total_pages);
        Self {
            current_page,
            total_pages,
            total_count,
            limit,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Like [`normalized`](Self::normalized) but derives `total_pages` from
    /// `total_count` and `limit`.
    pub fn from_count(current_page: u32, total_count: u64, limit: u32) -> Self {
        Self::normalized(current_page, pages_for(total_count, limit), total_count, limit)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_prev_page(&self) -> bool {
        self.has_prev_page
    }

    /// Whether `page` names an existing page other than the current one.
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages && page != self.current_page
    }

    /// Move to `page` without touching totals. Clamped like everything else.
    pub(crate) fn with_page(self, page: u32) -> Self {
        Self::normalized(page, self.total_pages, self.total_count, self.limit)
    }

    /// New page size; position goes back to the first page.
    pub(crate) fn with_limit(self, limit: u32) -> Self {
        Self::normalized(1, self.total_pages, self.total_count, limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(10)
    }
}

/// `ceil(total_count / limit)`, at least 1.
pub fn pages_for(total_count: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total_count.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
