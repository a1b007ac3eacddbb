//! Vaccination record API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! projections, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod projection;
pub mod router;
pub mod routes;
pub mod state;
