//! # contrib_store
//!
//! Client-side collection stores for the contribution tracker's REST API.
//!
//! Each [`CollectionStore`] holds one page of a remote listing (projects,
//! users, leaderboard) together with the filters, sort and pagination that
//! produced it. Actions mutate that state and refetch; responses are
//! normalized from whichever envelope the backend used, and a response that
//! arrives after a newer request started is discarded.
//!
//! ```ignore
//! use contrib_store::{keys, ClientConfig, Stores};
//!
//! let stores = Stores::connect(&ClientConfig::from_env()?)?;
//! stores.projects.initialize_and_fetch().await;
//! stores.projects.set_filter(keys::TAGS, ["react"]).await;
//! stores.projects.set_search("cli");
//! ```

mod config;
mod debounce;
mod endpoint;
mod envelope;
mod error;
mod fetch;
mod pagination;
mod query;
mod store;
mod stores;
mod transport;

pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_DEBOUNCE,
    ENV_API_TOKEN, ENV_API_URL, ENV_PAGE_LIMIT, ENV_REQUEST_TIMEOUT_MS, ENV_SEARCH_DEBOUNCE_MS,
};
pub use debounce::Debouncer;
pub use endpoint::{
    Endpoint, LeaderboardEndpoint, LeaderboardEntry, Project, ProjectsEndpoint, QueryParams,
    UserProfile, UsersEndpoint, DEFAULT_PAGE_LIMIT, STREAK_LEADERBOARD,
};
pub use envelope::{normalize, Envelope, Page, PageMeta};
pub use error::{ConfigError, ErrorKind, FetchError, ShapeError};
pub use fetch::FetchAdapter;
pub use pagination::{pages_for, Pagination};
pub use query::{keys, FilterValue, Filters, ListQuery, Sort, SortOrder};
pub use store::{
    CollectionState, CollectionStore, FetchOutcome, LeaderboardStore, ProjectsStore,
    SkipReason, UsersStore,
};
pub use stores::Stores;
pub use transport::{GetRequest, InMemoryTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
