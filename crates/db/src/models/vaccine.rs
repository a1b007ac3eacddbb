//! Vaccine entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxrecord_core::types::{DbId, Timestamp};

/// A vaccine row from the `vaccines` table. Owned by a patient.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vaccine {
    pub id: DbId,
    pub patient_id: DbId,
    pub vaccine_name: String,
    /// Calendar date kept as text (`YYYY-MM-DD` by convention, not enforced).
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new vaccine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaccine {
    #[serde(rename = "patientID")]
    pub patient_id: DbId,
    pub vaccine_name: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}

/// DTO for replacing every mutable field of a vaccine.
///
/// `patient_id` may point at a different patient, which must exist.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVaccine {
    #[serde(rename = "patientID")]
    pub patient_id: DbId,
    pub vaccine_name: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub vaccine_type: String,
}
