//! Repository for the `doses` table.

use sqlx::PgPool;
use vaxrecord_core::types::DbId;

use crate::error::RepoError;
use crate::models::dose::{CreateDose, Dose, UpdateDose};
use crate::models::patient::Patient;
use crate::models::vaccine::Vaccine;
use crate::repositories::{PatientRepo, VaccineRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, vaccine_id, type_dose, dose_date, dose_number, application_type, \
     created_at, updated_at";

const ENTITY: &str = "Dose";

/// Provides CRUD operations for doses.
pub struct DoseRepo;

impl DoseRepo {
    /// Insert a new dose, returning the created row.
    ///
    /// Fails with `InvalidReference` (and inserts nothing) when the vaccine
    /// does not exist.
    pub async fn create(pool: &PgPool, input: &CreateDose) -> Result<Dose, RepoError> {
        let mut tx = pool.begin().await?;

        VaccineRepo::lock_as_parent(&mut tx, input.vaccine_id).await?;

        let query = format!(
            "INSERT INTO doses (vaccine_id, type_dose, dose_date, dose_number, application_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let dose = sqlx::query_as::<_, Dose>(&query)
            .bind(input.vaccine_id)
            .bind(&input.type_dose)
            .bind(&input.dose_date)
            .bind(input.dose_number)
            .bind(&input.application_type)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(dose)
    }

    /// Find a dose by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dose>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doses WHERE id = $1");
        sqlx::query_as::<_, Dose>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all doses in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dose>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doses ORDER BY id ASC");
        sqlx::query_as::<_, Dose>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable field of a dose, including its vaccine.
    ///
    /// A missing dose yields `NotFound`; a missing vaccine yields
    /// `InvalidReference`. Either way the stored row is unchanged.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateDose) -> Result<Dose, RepoError> {
        let mut tx = pool.begin().await?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM doses WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        VaccineRepo::lock_as_parent(&mut tx, input.vaccine_id).await?;

        let query = format!(
            "UPDATE doses SET
                vaccine_id = $2,
                type_dose = $3,
                dose_date = $4,
                dose_number = $5,
                application_type = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let dose = sqlx::query_as::<_, Dose>(&query)
            .bind(id)
            .bind(input.vaccine_id)
            .bind(&input.type_dose)
            .bind(&input.dose_date)
            .bind(input.dose_number)
            .bind(&input.application_type)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(dose)
    }

    /// Delete a dose, returning its last-known values with the vaccine and
    /// patient it belonged to, all read in the deleting transaction.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<(Dose, Vaccine, Patient), RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM doses WHERE id = $1 RETURNING {COLUMNS}");
        let dose = sqlx::query_as::<_, Dose>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        let vaccine = VaccineRepo::fetch_in(&mut tx, dose.vaccine_id)
            .await?
            .ok_or_else(|| {
                RepoError::inconsistent(format!(
                    "Dose {id} references missing Vaccine {}",
                    dose.vaccine_id
                ))
            })?;
        let patient = PatientRepo::fetch_in(&mut tx, vaccine.patient_id)
            .await?
            .ok_or_else(|| {
                RepoError::inconsistent(format!(
                    "Vaccine {} references missing Patient {}",
                    vaccine.id, vaccine.patient_id
                ))
            })?;

        tx.commit().await?;
        Ok((dose, vaccine, patient))
    }
}
