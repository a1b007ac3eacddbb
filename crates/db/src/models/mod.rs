//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for full replacement (every field required)
//!
//! DTO field names follow the public wire format (`lastName`, `patientID`, ...).

pub mod dose;
pub mod patient;
pub mod vaccine;
