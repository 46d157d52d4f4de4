//! Endpoints - per-domain wire mapping for collection listings.
//!
//! An [`Endpoint`] knows how a [`ListQuery`] becomes a GET request for one
//! backend collection, which key holds its items in a `data` envelope, what
//! its default filters and sort are, and which sort orders it accepts.
//!
//! Three endpoints ship with the crate:
//!
//! | Endpoint | Path | Record |
//! |---|---|---|
//! | [`ProjectsEndpoint`] | `project/get-all` | [`Project`] |
//! | [`UsersEndpoint`] | `users` | [`UserProfile`] |
//! | [`LeaderboardEndpoint`] | `stats/leaderboard`, `stats/streak/leaderboard` | [`LeaderboardEntry`] |

mod leaderboard;
mod params;
mod projects;
mod users;

pub use leaderboard::{LeaderboardEndpoint, LeaderboardEntry, STREAK_LEADERBOARD};
pub use params::QueryParams;
pub use projects::{Project, ProjectsEndpoint};
pub use users::{UserProfile, UsersEndpoint};

use serde::de::DeserializeOwned;

use crate::query::{Filters, ListQuery, Sort, SortOrder};
use crate::transport::GetRequest;

/// Page size used when an endpoint does not pick its own.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Wire mapping for one remote collection.
pub trait Endpoint: Send + Sync + 'static {
    /// Record type the collection holds.
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Short name used in logs (e.g. "projects").
    fn name(&self) -> &'static str;

    /// Path relative to the API base, without a leading slash.
    fn path(&self, query: &ListQuery) -> String;

    /// Key of the items array inside a `{ "data": { ... } }` envelope.
    fn collection_key(&self) -> &'static str;

    /// Query-string pairs for `query`, including `page` and `limit`.
    fn query_params(&self, query: &ListQuery) -> QueryParams;

    fn default_filters(&self) -> Filters;

    fn default_sort(&self) -> Sort;

    fn default_limit(&self) -> u32 {
        DEFAULT_PAGE_LIMIT
    }

    /// Whether the backend can sort this collection in `order`.
    fn supports_order(&self, _order: SortOrder) -> bool {
        true
    }

    /// The full GET request for `query`.
    fn request(&self, query: &ListQuery) -> GetRequest {
        GetRequest::new(self.path(query)).with_query(self.query_params(query).into_pairs())
    }
}

/// Append `page` and `limit`, the tail every endpoint shares.
pub(crate) fn push_paging(params: &mut QueryParams, query: &ListQuery) {
    params.push("page", query.page).push("limit", query.limit);
}
