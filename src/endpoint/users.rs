use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{push_paging, Endpoint, QueryParams};
use crate::query::{keys, Filters, ListQuery, Sort};

/// Experience level value meaning "no filter".
const ANY_EXPERIENCE: &str = "all";

/// A community member as returned by the user directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(alias = "full_name", alias = "name")]
    pub full_name: Option<String>,
    #[serde(alias = "avatar", alias = "avatar_url")]
    pub avatar_url: Option<String>,
    #[serde(alias = "experience_level")]
    pub experience_level: Option<String>,
    #[serde(alias = "github_username")]
    pub github_username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET users` with `search`, `sortBy`, `sortOrder`, `experience_level`,
/// `hasGithub`, `page`, `limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersEndpoint;

impl Endpoint for UsersEndpoint {
    type Item = UserProfile;

    fn name(&self) -> &'static str {
        "users"
    }

    fn path(&self, _query: &ListQuery) -> String {
        "users".to_string()
    }

    fn collection_key(&self) -> &'static str {
        "users"
    }

    fn query_params(&self, query: &ListQuery) -> QueryParams {
        let experience = query
            .filters
            .text(keys::EXPERIENCE_LEVEL)
            .filter(|level| !level.eq_ignore_ascii_case(ANY_EXPERIENCE));

        let mut params = QueryParams::new();
        params
            .push_opt("search", query.search())
            .push("sortBy", &query.sort.field)
            .push("sortOrder", query.sort.order)
            .push_opt("experience_level", experience)
            .push_flag("hasGithub", query.filters.flag(keys::HAS_GITHUB));
        push_paging(&mut params, query);
        params
    }

    fn default_filters(&self) -> Filters {
        Filters::new()
            .with(keys::SEARCH, "")
            .with(keys::EXPERIENCE_LEVEL, ANY_EXPERIENCE)
            .with(keys::HAS_GITHUB, false)
    }

    fn default_sort(&self) -> Sort {
        Sort::desc("createdAt")
    }

    fn default_limit(&self) -> u32 {
        12
    }
}
