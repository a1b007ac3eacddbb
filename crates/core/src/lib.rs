//! Shared primitives for the vaccination record backend.
//!
//! Holds the identifier/timestamp aliases and the domain error taxonomy used
//! by both the repository layer and the HTTP layer.

pub mod error;
pub mod types;
