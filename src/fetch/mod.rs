//! Fetch adapter - turns a [`ListQuery`] into a normalized [`Page`].
//!
//! Stateless: everything it needs arrives in the query snapshot, and nothing
//! about the request outlives the call.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::endpoint::Endpoint;
use crate::envelope::{Envelope, Page};
use crate::error::FetchError;
use crate::query::ListQuery;
use crate::transport::Transport;

/// Binds an endpoint to a transport with a fixed timeout ceiling.
pub struct FetchAdapter<E, T> {
    endpoint: E,
    transport: T,
    timeout: Duration,
}

impl<E: Endpoint, T: Transport> FetchAdapter<E, T> {
    pub fn new(endpoint: E, transport: T) -> Self {
        Self {
            endpoint,
            transport,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET for `query` and normalize the response.
    pub async fn fetch(&self, query: &ListQuery) -> Result<Page<E::Item>, FetchError> {
        let request = self.endpoint.request(query);
        debug!(
            endpoint = self.endpoint.name(),
            path = %request.path,
            page = query.page,
            "fetching collection page"
        );

        let body = match tokio::time::timeout(self.timeout, self.transport.get(request)).await {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::Timeout(self.timeout)),
        };

        let envelope = Envelope::parse(body, self.endpoint.collection_key()).map_err(|e| {
            warn!(endpoint = self.endpoint.name(), error = %e, "unrecognized response envelope");
            e
        })?;

        Ok(envelope.into_page(query.page, query.limit)?)
    }
}
