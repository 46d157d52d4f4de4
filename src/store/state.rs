use std::fmt;

use crate::error::FetchError;
use crate::pagination::Pagination;
use crate::query::{Filters, ListQuery, Sort, SortOrder};

/// Everything a view needs to render one remote collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Records of the current page, in server order.
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub filters: Filters,
    pub sort: Sort,
    /// True exactly while the current fetch is in flight.
    pub loading: bool,
    /// Set by a failed fetch, cleared when the next one starts.
    pub error: Option<FetchError>,
    /// True once any fetch has succeeded.
    pub is_initialized: bool,
}

impl<T> CollectionState<T> {
    pub(crate) fn initial(filters: Filters, sort: Sort, limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::first(limit),
            filters,
            sort,
            loading: false,
            error: None,
            is_initialized: false,
        }
    }

    /// The stringified failure reason, if the last fetch failed.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Snapshot of the parameters the next fetch will send.
    pub fn query(&self) -> ListQuery {
        ListQuery::new(
            self.filters.clone(),
            self.sort.clone(),
            self.pagination.current_page(),
            self.pagination.limit(),
        )
    }
}

/// Why a store action did not issue a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch is already running and this action does not supersede it.
    InFlight,
    /// Requested page is outside `1..=total_pages`.
    OutOfRange { requested: u32, total_pages: u32 },
    /// Requested page is the one already shown.
    SamePage,
    /// Filters and sort already equal their defaults.
    AlreadyDefault,
    /// The first page has already been loaded.
    AlreadyInitialized,
    /// The new value equals the current one.
    Unchanged,
    /// The endpoint cannot sort in this direction.
    UnsupportedSort(SortOrder),
    /// Page size must be positive.
    InvalidLimit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InFlight => write!(f, "fetch already in flight"),
            SkipReason::OutOfRange {
                requested,
                total_pages,
            } => write!(f, "page {} outside 1..={}", requested, total_pages),
            SkipReason::SamePage => write!(f, "already on requested page"),
            SkipReason::AlreadyDefault => write!(f, "filters already at defaults"),
            SkipReason::AlreadyInitialized => write!(f, "already initialized"),
            SkipReason::Unchanged => write!(f, "value unchanged"),
            SkipReason::UnsupportedSort(order) => write!(f, "sort order {} not supported", order),
            SkipReason::InvalidLimit => write!(f, "page limit must be positive"),
        }
    }
}

/// What a store action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and committed.
    Applied,
    /// The fetch failed; the error is now in state and items are untouched.
    Failed(FetchError),
    /// No request was issued.
    Skipped(SkipReason),
    /// State was updated and a debounced fetch is pending.
    Scheduled,
    /// A newer fetch started before this one finished; its result was dropped.
    Superseded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped(_))
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}
