//! Dose entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxrecord_core::types::{DbId, Timestamp};

/// A dose row from the `doses` table. Owned by a vaccine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dose {
    pub id: DbId,
    pub vaccine_id: DbId,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dose.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDose {
    #[serde(rename = "vaccineID")]
    pub vaccine_id: DbId,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}

/// DTO for replacing every mutable field of a dose.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDose {
    #[serde(rename = "vaccineID")]
    pub vaccine_id: DbId,
    pub type_dose: String,
    pub dose_date: String,
    pub dose_number: i32,
    pub application_type: String,
}
