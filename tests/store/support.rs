//! Shared fixtures: an in-memory project catalogue with a failure switch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use contrib_store::{
    pages_for, ClientConfig, FetchError, GetRequest, InMemoryTransport, ProjectsEndpoint,
    ProjectsStore,
};
use serde_json::{json, Value};

pub const DEBOUNCE: Duration = Duration::from_millis(400);
pub const PAGE_SIZE: u32 = 10;

/// Fake `project/get-all` backend.
///
/// Serves `count` projects, narrowed by the `tags` parameter when present,
/// page by page. `fail_with` makes every following request fail.
#[derive(Clone)]
pub struct Catalogue {
    projects: Arc<Vec<Value>>,
    failure: Arc<Mutex<Option<FetchError>>>,
}

impl Catalogue {
    pub fn new(count: usize) -> Self {
        let projects = (1..=count)
            .map(|i| {
                let tag = if i % 2 == 0 { "react" } else { "rust" };
                json!({ "_id": format!("p{}", i), "title": format!("Project {}", i), "tags": [tag] })
            })
            .collect();
        Self {
            projects: Arc::new(projects),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn fail_with(&self, error: FetchError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn transport(&self) -> InMemoryTransport {
        let catalogue = self.clone();
        InMemoryTransport::new(move |request| catalogue.respond(request))
    }

    fn respond(&self, request: &GetRequest) -> Result<Value, FetchError> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        let tags: Vec<&str> = request
            .param("tags")
            .map(|t| t.split(',').collect())
            .unwrap_or_default();
        let matching: Vec<&Value> = self
            .projects
            .iter()
            .filter(|p| {
                tags.is_empty()
                    || p["tags"]
                        .as_array()
                        .is_some_and(|pt| pt.iter().any(|t| tags.contains(&t.as_str().unwrap_or(""))))
            })
            .collect();

        let limit: u32 = request.param("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
        let page: u32 = request.param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let total = matching.len() as u64;
        let start = ((page.max(1) - 1) * limit) as usize;
        let slice: Vec<&Value> = matching.into_iter().skip(start).take(limit as usize).collect();

        Ok(json!({
            "data": {
                "projects": slice,
                "total": total,
                "page": page,
                "totalPages": pages_for(total, limit),
            }
        }))
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::default()
        .with_page_limit(PAGE_SIZE)
        .with_search_debounce(DEBOUNCE)
}

pub fn store(transport: InMemoryTransport) -> ProjectsStore<InMemoryTransport> {
    ProjectsStore::new(ProjectsEndpoint, transport, &config())
}

/// Store over a 50-project catalogue, first page loaded, request log cleared.
pub async fn loaded_store() -> (ProjectsStore<InMemoryTransport>, Catalogue) {
    let catalogue = Catalogue::new(50);
    let store = store(catalogue.transport());
    assert!(store.initialize_and_fetch().await.is_applied());
    store.transport().clear_requests();
    (store, catalogue)
}

pub fn ids(store: &ProjectsStore<InMemoryTransport>) -> Vec<String> {
    store.items().into_iter().map(|p| p.id).collect()
}

pub fn requested_pages(store: &ProjectsStore<InMemoryTransport>) -> Vec<String> {
    store
        .transport()
        .requests()
        .iter()
        .filter_map(|r| r.param("page").map(str::to_string))
        .collect()
}
