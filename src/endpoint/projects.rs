use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{push_paging, Endpoint, QueryParams};
use crate::query::{keys, Filters, ListQuery, Sort};

/// A project/repository listing entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(alias = "tech_stack")]
    pub tech_stack: Vec<String>,
    #[serde(alias = "github_url", alias = "repoUrl")]
    pub github_url: Option<String>,
    /// Fields the client does not model, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET project/get-all` with `search`, `tags`, `tech_stack`, `sort`, `page`, `limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectsEndpoint;

impl Endpoint for ProjectsEndpoint {
    type Item = Project;

    fn name(&self) -> &'static str {
        "projects"
    }

    fn path(&self, _query: &ListQuery) -> String {
        "project/get-all".to_string()
    }

    fn collection_key(&self) -> &'static str {
        "projects"
    }

    fn query_params(&self, query: &ListQuery) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("search", query.search())
            .push_list("tags", &query.filters.list(keys::TAGS))
            .push_list("tech_stack", &query.filters.list(keys::TECH))
            .push("sort", &query.sort.field);
        push_paging(&mut params, query);
        params
    }

    fn default_filters(&self) -> Filters {
        Filters::new()
            .with(keys::SEARCH, "")
            .with(keys::TAGS, Vec::<String>::new())
            .with(keys::TECH, Vec::<String>::new())
    }

    fn default_sort(&self) -> Sort {
        Sort::desc("newest")
    }

    fn default_limit(&self) -> u32 {
        12
    }
}
