use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::state::{CollectionState, FetchOutcome, SkipReason};
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::fetch::FetchAdapter;
use crate::pagination::Pagination;
use crate::query::{keys, FilterValue, Filters, ListQuery, Sort};
use crate::transport::Transport;

/// Client-side store for one paginated, filterable remote collection.
///
/// Cheap to clone; clones share state. All mutation goes through the
/// actions below, each of which reports a [`FetchOutcome`].
///
/// ## Example
///
/// ```ignore
/// let store = CollectionStore::new(ProjectsEndpoint, transport, &config);
/// store.initialize_and_fetch().await;
///
/// store.set_filter(keys::TAGS, ["react"]).await;   // page 1, fetch now
/// store.set_search("graph");                        // page 1, fetch after the window
/// store.go_to_page(2).await;
///
/// let state = store.snapshot();
/// render(&state.items, state.pagination);
/// ```
pub struct CollectionStore<E: Endpoint, T> {
    inner: Arc<Inner<E, T>>,
}

impl<E: Endpoint, T> Clone for CollectionStore<E, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<E: Endpoint, T> {
    adapter: FetchAdapter<E, T>,
    defaults: Defaults,
    state: Mutex<CollectionState<E::Item>>,
    /// Bumped whenever a fetch starts or in-flight work is abandoned.
    generation: watch::Sender<u64>,
    /// Bumped on every state change.
    revision: watch::Sender<u64>,
    search_debounce: Debouncer,
}

struct Defaults {
    filters: Filters,
    sort: Sort,
    limit: u32,
}

/// A fetch that has been started: its generation token and query snapshot.
struct Ticket {
    token: u64,
    query: ListQuery,
}

impl<E: Endpoint, T: Transport> CollectionStore<E, T> {
    /// Build a store using the endpoint's defaults and `config`'s timeout,
    /// debounce window and page size.
    pub fn new(endpoint: E, transport: T, config: &ClientConfig) -> Self {
        let defaults = Defaults {
            filters: endpoint.default_filters(),
            sort: endpoint.default_sort(),
            limit: config.page_limit.unwrap_or_else(|| endpoint.default_limit()).max(1),
        };
        let state = CollectionState::initial(
            defaults.filters.clone(),
            defaults.sort.clone(),
            defaults.limit,
        );
        let adapter = FetchAdapter::new(endpoint, transport).with_timeout(config.request_timeout);

        Self {
            inner: Arc::new(Inner {
                adapter,
                defaults,
                state: Mutex::new(state),
                generation: watch::Sender::new(0),
                revision: watch::Sender::new(0),
                search_debounce: Debouncer::new(config.search_debounce),
            }),
        }
    }

    pub fn endpoint(&self) -> &E {
        self.inner.adapter.endpoint()
    }

    pub fn transport(&self) -> &T {
        self.inner.adapter.transport()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Clone of the full state.
    pub fn snapshot(&self) -> CollectionState<E::Item> {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<E::Item> {
        self.lock().items.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.lock().pagination
    }

    pub fn filters(&self) -> Filters {
        self.lock().filters.clone()
    }

    pub fn sort(&self) -> Sort {
        self.lock().sort.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_initialized
    }

    pub fn error(&self) -> Option<FetchError> {
        self.lock().error.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock().error_message()
    }

    /// Whether a debounced search fetch is waiting to fire.
    pub fn has_pending_search(&self) -> bool {
        self.inner.search_debounce.is_pending()
    }

    /// Receiver whose value changes every time state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Fetch the page described by current state.
    ///
    /// No-op while another fetch is in flight.
    pub async fn fetch_current_page(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            if state.loading {
                debug!(endpoint = self.name(), "fetch already in flight, ignoring");
                return FetchOutcome::Skipped(SkipReason::InFlight);
            }
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    /// Retry after a failure ("Try Again").
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch_current_page().await
    }

    /// First fetch for a freshly mounted view; no-op once initialized.
    pub async fn initialize_and_fetch(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            if state.is_initialized {
                return FetchOutcome::Skipped(SkipReason::AlreadyInitialized);
            }
            if state.loading {
                return FetchOutcome::Skipped(SkipReason::InFlight);
            }
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    /// Replace one filter, go back to page 1 and fetch immediately.
    ///
    /// Supersedes any fetch already in flight.
    pub async fn set_filter(&self, key: &str, value: impl Into<FilterValue>) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            state.filters.set(key, value);
            state.pagination = state.pagination.with_page(1);
            self.begin(&mut state)
        };
        // The fetch just started already carries the latest search text.
        self.inner.search_debounce.cancel();
        self.complete(ticket).await
    }

    /// Store the search text, go back to page 1, and fetch once typing pauses.
    ///
    /// A fetch already in flight is abandoned so it cannot commit an older
    /// page over the reset. The pending trigger holds only a weak handle:
    /// once every store handle is dropped it does nothing.
    pub fn set_search(&self, query: impl Into<String>) -> FetchOutcome {
        {
            let mut state = self.lock();
            state.filters.set(keys::SEARCH, query.into());
            state.pagination = state.pagination.with_page(1);
            if state.loading {
                self.next_generation();
                state.loading = false;
            }
        }
        self.notify();

        let inner = Arc::downgrade(&self.inner);
        self.inner.search_debounce.call(move || async move {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let store = CollectionStore { inner };
            let outcome = store.refetch().await;
            debug!(endpoint = store.name(), ?outcome, "debounced search fetch finished");
        });
        FetchOutcome::Scheduled
    }

    /// Move to page `page` and fetch it.
    ///
    /// Skipped when `page` is out of range, already current, or a fetch is
    /// in flight. Current page is written before the fetch reads state.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            if state.loading {
                return FetchOutcome::Skipped(SkipReason::InFlight);
            }
            let pagination = state.pagination;
            if page < 1 || page > pagination.total_pages() {
                return FetchOutcome::Skipped(SkipReason::OutOfRange {
                    requested: page,
                    total_pages: pagination.total_pages(),
                });
            }
            if page == pagination.current_page() {
                return FetchOutcome::Skipped(SkipReason::SamePage);
            }
            state.pagination = pagination.with_page(page);
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        let current = self.pagination().current_page();
        self.go_to_page(current.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        let current = self.pagination().current_page();
        self.go_to_page(current.saturating_sub(1)).await
    }

    /// Restore default filters and sort, go back to page 1 and fetch.
    ///
    /// Skipped when already at defaults or while a fetch is in flight.
    pub async fn clear_filters(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            if state.loading {
                return FetchOutcome::Skipped(SkipReason::InFlight);
            }
            let defaults = &self.inner.defaults;
            if state.filters == defaults.filters && state.sort == defaults.sort {
                return FetchOutcome::Skipped(SkipReason::AlreadyDefault);
            }
            state.filters = defaults.filters.clone();
            state.sort = defaults.sort.clone();
            state.pagination = state.pagination.with_page(1);
            self.begin(&mut state)
        };
        self.inner.search_debounce.cancel();
        self.complete(ticket).await
    }

    /// Replace the sort, go back to page 1 and fetch.
    pub async fn set_sort(&self, sort: Sort) -> FetchOutcome {
        if !self.endpoint().supports_order(sort.order) {
            debug!(endpoint = self.name(), order = %sort.order, "sort order not supported");
            return FetchOutcome::Skipped(SkipReason::UnsupportedSort(sort.order));
        }
        let ticket = {
            let mut state = self.lock();
            if state.sort == sort {
                return FetchOutcome::Skipped(SkipReason::Unchanged);
            }
            state.sort = sort;
            state.pagination = state.pagination.with_page(1);
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    /// Change the page size, go back to page 1 and fetch.
    pub async fn set_limit(&self, limit: u32) -> FetchOutcome {
        if limit == 0 {
            return FetchOutcome::Skipped(SkipReason::InvalidLimit);
        }
        let ticket = {
            let mut state = self.lock();
            if state.pagination.limit() == limit {
                return FetchOutcome::Skipped(SkipReason::Unchanged);
            }
            state.pagination = state.pagination.with_limit(limit);
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    /// Back to the freshly constructed state.
    ///
    /// Cancels a pending search, abandons any in-flight fetch and drops
    /// loaded items.
    pub fn reset(&self) {
        self.inner.search_debounce.cancel();
        {
            let mut state = self.lock();
            self.next_generation();
            let defaults = &self.inner.defaults;
            *state = CollectionState::initial(
                defaults.filters.clone(),
                defaults.sort.clone(),
                defaults.limit,
            );
        }
        self.notify();
    }

    // ========================================================================
    // Fetch plumbing
    // ========================================================================

    /// Start a fetch that supersedes whatever is in flight.
    async fn refetch(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.lock();
            self.begin(&mut state)
        };
        self.complete(ticket).await
    }

    /// Mark state as loading and issue a new generation token.
    ///
    /// Runs under the state lock so the loading check and write are atomic.
    fn begin(&self, state: &mut CollectionState<E::Item>) -> Ticket {
        state.loading = true;
        state.error = None;
        Ticket {
            token: self.next_generation(),
            query: state.query(),
        }
    }

    /// Run the request for `ticket` and commit the result if still current.
    async fn complete(&self, ticket: Ticket) -> FetchOutcome {
        self.notify();

        let mut generation = self.inner.generation.subscribe();
        let result = tokio::select! {
            result = self.inner.adapter.fetch(&ticket.query) => result,
            _ = superseded(&mut generation, ticket.token) => {
                debug!(endpoint = self.name(), page = ticket.query.page, "fetch superseded, request dropped");
                return FetchOutcome::Superseded;
            }
        };

        let outcome = {
            let mut state = self.lock();
            if *self.inner.generation.borrow() != ticket.token {
                debug!(endpoint = self.name(), "stale response discarded");
                return FetchOutcome::Superseded;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    info!(
                        endpoint = self.name(),
                        page = page.pagination.current_page(),
                        total_pages = page.pagination.total_pages(),
                        items = page.items.len(),
                        "page loaded"
                    );
                    state.items = page.items;
                    state.pagination = page.pagination;
                    state.error = None;
                    state.is_initialized = true;
                    FetchOutcome::Applied
                }
                Err(e) => {
                    warn!(endpoint = self.name(), error = %e, "fetch failed");
                    state.error = Some(e.clone());
                    FetchOutcome::Failed(e)
                }
            }
        };

        self.notify();
        outcome
    }

    fn next_generation(&self) -> u64 {
        let mut next = 0;
        self.inner.generation.send_modify(|generation| {
            *generation += 1;
            next = *generation;
        });
        next
    }

    fn notify(&self) {
        self.inner
            .revision
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState<E::Item>> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn name(&self) -> &'static str {
        self.endpoint().name()
    }
}

/// Resolves once the generation moves past `token`.
async fn superseded(generation: &mut watch::Receiver<u64>, token: u64) {
    loop {
        if *generation.borrow_and_update() != token {
            return;
        }
        if generation.changed().await.is_err() {
            // Sender gone means the store is gone; nothing can supersede us.
            std::future::pending::<()>().await;
        }
    }
}
