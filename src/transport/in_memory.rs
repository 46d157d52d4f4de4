//! InMemoryTransport - closure-backed transport for testing and development.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};

use super::{GetRequest, Transport};
use crate::error::FetchError;
use crate::pagination::pages_for;

type Responder = dyn Fn(&GetRequest) -> Result<Value, FetchError> + Send + Sync;
type Latency = dyn Fn(&GetRequest) -> Duration + Send + Sync;

/// In-memory transport answering requests from a closure.
///
/// Every request is recorded so tests can assert on what was sent.
/// Clone-friendly via Arc; clones share the responder and the request log.
#[derive(Clone)]
pub struct InMemoryTransport {
    responder: Arc<Responder>,
    latency: Option<Arc<Latency>>,
    requests: Arc<Mutex<Vec<GetRequest>>>,
}

impl InMemoryTransport {
    /// Answer each request with `responder(&request)`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&GetRequest) -> Result<Value, FetchError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with the same body.
    pub fn json(body: Value) -> Self {
        Self::new(move |_| Ok(body.clone()))
    }

    /// Fail every request with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    /// Serve `items` page by page, honouring the `page` and `limit` query
    /// parameters, wrapped as `{ "data": { "<key>": [...], total, page,
    /// totalPages, limit } }`.
    pub fn paginated<T: Serialize>(collection_key: &str, items: &[T]) -> Self {
        let key = collection_key.to_string();
        let items: Vec<Value> = items
            .iter()
            .map(|item| serde_json::to_value(item).unwrap_or(Value::Null))
            .collect();

        Self::new(move |request| {
            let limit = number_param(request, "limit").unwrap_or(10).max(1);
            let total = items.len() as u64;
            let total_pages = pages_for(total, limit);
            let page = number_param(request, "page").unwrap_or(1).clamp(1, total_pages);
            let start = ((page - 1) as usize).saturating_mul(limit as usize);
            let slice: Vec<Value> = items.iter().skip(start).take(limit as usize).cloned().collect();

            Ok(json!({
                "data": {
                    key.as_str(): slice,
                    "total": total,
                    "page": page,
                    "totalPages": total_pages,
                    "limit": limit,
                }
            }))
        })
    }

    /// Delay each response by `latency(&request)`.
    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(&GetRequest) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Arc::new(latency));
        self
    }

    /// Delay every response by the same amount.
    pub fn with_fixed_latency(self, latency: Duration) -> Self {
        self.with_latency(move |_| latency)
    }

    /// All requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<GetRequest> {
        self.log().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log().len()
    }

    pub fn last_request(&self) -> Option<GetRequest> {
        self.log().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.log().clear();
    }

    fn log(&self) -> MutexGuard<'_, Vec<GetRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for InMemoryTransport {
    fn get(&self, request: GetRequest) -> impl Future<Output = Result<Value, FetchError>> + Send {
        self.log().push(request.clone());
        let responder = Arc::clone(&self.responder);
        let delay = self.latency.as_ref().map(|latency| latency(&request));

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            responder(&request)
        }
    }
}

fn number_param(request: &GetRequest, key: &str) -> Option<u32> {
    request.param(key).and_then(|v| v.parse().ok())
}
