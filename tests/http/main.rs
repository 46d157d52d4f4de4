//! HttpTransport integration tests.
//!
//! Starts a stub of the contribution-tracker API with axum and drives the
//! stores against it over real sockets.

#![cfg(feature = "http")]

mod server;
