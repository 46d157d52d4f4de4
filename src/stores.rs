//! Application-root container for the bundled stores.
//!
//! Built once at startup and handed to whatever needs a store, instead of
//! module-level singletons. `reset_all` is the teardown hook for tests and
//! logout.

use crate::config::ClientConfig;
use crate::endpoint::{LeaderboardEndpoint, ProjectsEndpoint, UsersEndpoint};
use crate::store::{FetchOutcome, LeaderboardStore, ProjectsStore, UsersStore};
use crate::transport::Transport;

#[cfg(feature = "http")]
use crate::error::ConfigError;
#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// One store per listing domain, all sharing a transport.
#[derive(Clone)]
pub struct Stores<T: Transport> {
    pub projects: ProjectsStore<T>,
    pub users: UsersStore<T>,
    pub leaderboard: LeaderboardStore<T>,
}

impl<T: Transport + Clone> Stores<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            projects: ProjectsStore::new(ProjectsEndpoint, transport.clone(), config),
            users: UsersStore::new(UsersEndpoint, transport.clone(), config),
            leaderboard: LeaderboardStore::new(LeaderboardEndpoint, transport, config),
        }
    }
}

impl<T: Transport> Stores<T> {
    /// Initial fetch for every store, concurrently.
    pub async fn initialize_all(&self) -> [FetchOutcome; 3] {
        let (projects, users, leaderboard) = tokio::join!(
            self.projects.initialize_and_fetch(),
            self.users.initialize_and_fetch(),
            self.leaderboard.initialize_and_fetch(),
        );
        [projects, users, leaderboard]
    }

    pub fn reset_all(&self) {
        self.projects.reset();
        self.users.reset();
        self.leaderboard.reset();
    }
}

#[cfg(feature = "http")]
impl Stores<HttpTransport> {
    /// Stores talking to the real API described by `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config))
    }
}
