//! Collection store integration tests against an in-memory backend.

mod support;

mod filters;
mod paging;
mod search;
