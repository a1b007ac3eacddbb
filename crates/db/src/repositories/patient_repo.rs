//! Repository for the `patients` table.

use sqlx::{PgConnection, PgPool};
use vaxrecord_core::types::DbId;

use crate::error::RepoError;
use crate::models::patient::{CreatePatient, Patient, UpdatePatient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, last_name, created_at, updated_at";

const ENTITY: &str = "Patient";

/// Provides CRUD operations for patients.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient, returning the created row with its assigned ID.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<Patient, RepoError> {
        let query = format!(
            "INSERT INTO patients (name, last_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(&input.name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await?;
        Ok(patient)
    }

    /// Find a patient by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every patient whose ID is in `ids`. Unknown IDs are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = ANY($1)");
        sqlx::query_as::<_, Patient>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all patients in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients ORDER BY id ASC");
        sqlx::query_as::<_, Patient>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable field of a patient.
    ///
    /// Fails with `NotFound` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Patient, RepoError> {
        let query = format!(
            "UPDATE patients SET
                name = $2,
                last_name = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.last_name)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))
    }

    /// Delete a patient, returning its last-known values.
    ///
    /// Vaccines (and through them, doses) are removed by `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Patient, RepoError> {
        let query = format!("DELETE FROM patients WHERE id = $1 RETURNING {COLUMNS}");
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;
        tracing::debug!(patient_id = id, "Patient deleted with cascade");
        Ok(patient)
    }

    /// Read a patient on an open connection, typically inside a transaction.
    pub(crate) async fn fetch_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Check that a patient exists and hold a key-share lock on it until the
    /// surrounding transaction ends, so it cannot be deleted underneath a
    /// child insert or update.
    pub(crate) async fn lock_as_parent(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<(), RepoError> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM patients WHERE id = $1 FOR KEY SHARE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(|_| ())
            .ok_or_else(|| RepoError::invalid_reference(ENTITY, id))
    }
}
