//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dose_repo;
pub mod patient_repo;
pub mod vaccine_repo;

pub use dose_repo::DoseRepo;
pub use patient_repo::PatientRepo;
pub use vaccine_repo::VaccineRepo;
