//! Patient entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxrecord_core::types::{DbId, Timestamp};

/// A patient row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new patient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub name: String,
    pub last_name: String,
}

/// DTO for replacing every mutable field of a patient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    pub name: String,
    pub last_name: String,
}
