//! Repository for the `vaccines` table.

use sqlx::{PgConnection, PgPool};
use vaxrecord_core::types::DbId;

use crate::error::RepoError;
use crate::models::patient::Patient;
use crate::models::vaccine::{CreateVaccine, UpdateVaccine, Vaccine};
use crate::repositories::PatientRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, patient_id, vaccine_name, dose_date, dose_number, vaccine_type, created_at, updated_at";

const ENTITY: &str = "Vaccine";

/// Provides CRUD operations for vaccines.
pub struct VaccineRepo;

impl VaccineRepo {
    /// Insert a new vaccine, returning the created row.
    ///
    /// The owning patient is checked first inside the same transaction; if it
    /// does not exist nothing is inserted and `InvalidReference` is returned.
    pub async fn create(pool: &PgPool, input: &CreateVaccine) -> Result<Vaccine, RepoError> {
        let mut tx = pool.begin().await?;

        PatientRepo::lock_as_parent(&mut tx, input.patient_id).await?;

        let query = format!(
            "INSERT INTO vaccines (patient_id, vaccine_name, dose_date, dose_number, vaccine_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let vaccine = sqlx::query_as::<_, Vaccine>(&query)
            .bind(input.patient_id)
            .bind(&input.vaccine_name)
            .bind(&input.dose_date)
            .bind(input.dose_number)
            .bind(&input.vaccine_type)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(vaccine)
    }

    /// Find a vaccine by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vaccine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaccines WHERE id = $1");
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every vaccine whose ID is in `ids`. Unknown IDs are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Vaccine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaccines WHERE id = ANY($1)");
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all vaccines in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Vaccine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaccines ORDER BY id ASC");
        sqlx::query_as::<_, Vaccine>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable field of a vaccine, including its owner.
    ///
    /// Runs in a transaction: lock the target row, verify the new patient,
    /// then write. Any failure rolls back and leaves the row untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVaccine,
    ) -> Result<Vaccine, RepoError> {
        let mut tx = pool.begin().await?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM vaccines WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        PatientRepo::lock_as_parent(&mut tx, input.patient_id).await?;

        let query = format!(
            "UPDATE vaccines SET
                patient_id = $2,
                vaccine_name = $3,
                dose_date = $4,
                dose_number = $5,
                vaccine_type = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let vaccine = sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .bind(input.patient_id)
            .bind(&input.vaccine_name)
            .bind(&input.dose_date)
            .bind(input.dose_number)
            .bind(&input.vaccine_type)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(vaccine)
    }

    /// Delete a vaccine, returning its last-known values together with its
    /// owner. Doses cascade.
    ///
    /// The owner is read in the same transaction as the delete, so the
    /// returned pair is consistent even if the patient is removed right after.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(Vaccine, Patient), RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM vaccines WHERE id = $1 RETURNING {COLUMNS}");
        let vaccine = sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        let patient = PatientRepo::fetch_in(&mut tx, vaccine.patient_id)
            .await?
            .ok_or_else(|| {
                RepoError::inconsistent(format!(
                    "Vaccine {id} references missing Patient {}",
                    vaccine.patient_id
                ))
            })?;

        tx.commit().await?;
        tracing::debug!(vaccine_id = id, "Vaccine deleted with cascade");
        Ok((vaccine, patient))
    }

    /// Read a vaccine on an open connection, typically inside a transaction.
    pub(crate) async fn fetch_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Vaccine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaccines WHERE id = $1");
        sqlx::query_as::<_, Vaccine>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Check that a vaccine exists and key-share lock it for the rest of the
    /// surrounding transaction.
    pub(crate) async fn lock_as_parent(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<(), RepoError> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM vaccines WHERE id = $1 FOR KEY SHARE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(|_| ())
            .ok_or_else(|| RepoError::invalid_reference(ENTITY, id))
    }
}
