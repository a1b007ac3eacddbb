//! Handlers for the `/patients` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vaxrecord_core::error::CoreError;
use vaxrecord_db::models::patient::{CreatePatient, UpdatePatient};
use vaxrecord_db::repositories::PatientRepo;

use crate::error::AppResult;
use crate::extract::{Fields, ResourceId};
use crate::projection::PatientView;
use crate::state::AppState;

/// POST /patients
pub async fn create(
    State(state): State<AppState>,
    Fields(input): Fields<CreatePatient>,
) -> AppResult<(StatusCode, Json<PatientView>)> {
    let patient = PatientRepo::create(&state.pool, &input).await?;
    tracing::info!(patient_id = patient.id, "Patient created");
    Ok((StatusCode::CREATED, Json(PatientView::from(&patient))))
}

/// GET /patients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<PatientView>>> {
    let patients = PatientRepo::list(&state.pool).await?;
    Ok(Json(patients.iter().map(PatientView::from).collect()))
}

/// GET /patients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<PatientView>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Patient",
            id,
        })?;
    Ok(Json(PatientView::from(&patient)))
}

/// PUT /patients/{id}
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Fields(input): Fields<UpdatePatient>,
) -> AppResult<Json<PatientView>> {
    let patient = PatientRepo::update(&state.pool, id, &input).await?;
    tracing::info!(patient_id = id, "Patient updated");
    Ok(Json(PatientView::from(&patient)))
}

/// DELETE /patients/{id}
///
/// Responds with the patient as it was just before deletion.
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<PatientView>> {
    let patient = PatientRepo::delete(&state.pool, id).await?;
    tracing::info!(patient_id = id, "Patient deleted");
    Ok(Json(PatientView::from(&patient)))
}
