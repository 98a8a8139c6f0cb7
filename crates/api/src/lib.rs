//! HTTP surface for the tally grade tracker.
//!
//! Exposed as a library so integration tests can build the same router
//! and middleware stack the binary runs.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
