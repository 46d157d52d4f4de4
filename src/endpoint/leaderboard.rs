use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{push_paging, Endpoint, QueryParams};
use crate::query::{keys, Filters, ListQuery, Sort, SortOrder};

/// `leaderboardType` value selecting the streak leaderboard.
pub const STREAK_LEADERBOARD: &str = "streak";

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(alias = "user_id", alias = "_id")]
    pub user_id: String,
    pub username: String,
    #[serde(alias = "value", alias = "count")]
    pub score: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET stats/leaderboard` (or `stats/streak/leaderboard`) with `metric`,
/// `period`, `page`, `limit`.
///
/// Ranking is always descending; the backend has no ascending mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardEndpoint;

impl Endpoint for LeaderboardEndpoint {
    type Item = LeaderboardEntry;

    fn name(&self) -> &'static str {
        "leaderboard"
    }

    fn path(&self, query: &ListQuery) -> String {
        match query.filters.text(keys::LEADERBOARD_TYPE) {
            Some(kind) if kind.eq_ignore_ascii_case(STREAK_LEADERBOARD) => {
                "stats/streak/leaderboard".to_string()
            }
            _ => "stats/leaderboard".to_string(),
        }
    }

    fn collection_key(&self) -> &'static str {
        "leaderboard"
    }

    fn query_params(&self, query: &ListQuery) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("metric", &query.sort.field)
            .push_opt("period", query.filters.text(keys::TIME_RANGE));
        push_paging(&mut params, query);
        params
    }

    fn default_filters(&self) -> Filters {
        Filters::new()
            .with(keys::TIME_RANGE, "all")
            .with(keys::LEADERBOARD_TYPE, "contributions")
    }

    fn default_sort(&self) -> Sort {
        Sort::desc("contributions")
    }

    fn supports_order(&self, order: SortOrder) -> bool {
        order == SortOrder::Desc
    }
}
