//! Collection stores - client-side state for paginated remote collections.
//!
//! ## Flow
//!
//! ```text
//! action (set_search / set_filter / go_to_page / ...)
//!    │
//!    ▼
//! state mutation (filters, page) ──▶ revision bump ──▶ subscribers
//!    │
//!    ├── set_search ──▶ Debouncer ──(window elapses)──┐
//!    │                                                 ▼
//!    └──────────────────────────────────────────▶ begin: loading = true,
//!                                                  generation += 1
//!                                                      │
//!                                                      ▼
//!                                               FetchAdapter::fetch
//!                                                      │
//!                               generation moved on? ──┴── still current?
//!                                      │                        │
//!                                  Superseded           commit page / error
//! ```
//!
//! Only the newest fetch may commit. Starting a fetch bumps the generation,
//! which drops the request of any older fetch still in flight.

mod collection;
mod state;

pub use collection::CollectionStore;
pub use state::{CollectionState, FetchOutcome, SkipReason};

use crate::endpoint::{LeaderboardEndpoint, ProjectsEndpoint, UsersEndpoint};

pub type ProjectsStore<T> = CollectionStore<ProjectsEndpoint, T>;
pub type UsersStore<T> = CollectionStore<UsersEndpoint, T>;
pub type LeaderboardStore<T> = CollectionStore<LeaderboardEndpoint, T>;
