//! Handlers for the `/vaccines` resource.
//!
//! Every response embeds the owning patient.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vaxrecord_core::error::CoreError;
use vaxrecord_db::models::vaccine::{CreateVaccine, UpdateVaccine};
use vaxrecord_db::repositories::VaccineRepo;

use crate::error::AppResult;
use crate::extract::{Fields, ResourceId};
use crate::projection::{self, VaccineView};
use crate::state::AppState;

/// POST /vaccines
pub async fn create(
    State(state): State<AppState>,
    Fields(input): Fields<CreateVaccine>,
) -> AppResult<(StatusCode, Json<VaccineView>)> {
    let vaccine = VaccineRepo::create(&state.pool, &input).await?;
    tracing::info!(
        vaccine_id = vaccine.id,
        patient_id = vaccine.patient_id,
        "Vaccine created"
    );
    let view = projection::vaccine_view(&state.pool, &vaccine).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /vaccines
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<VaccineView>>> {
    let vaccines = VaccineRepo::list(&state.pool).await?;
    let views = projection::vaccine_views(&state.pool, &vaccines).await?;
    Ok(Json(views))
}

/// GET /vaccines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<VaccineView>> {
    let vaccine = VaccineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Vaccine",
            id,
        })?;
    Ok(Json(projection::vaccine_view(&state.pool, &vaccine).await?))
}

/// PUT /vaccines/{id}
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Fields(input): Fields<UpdateVaccine>,
) -> AppResult<Json<VaccineView>> {
    let vaccine = VaccineRepo::update(&state.pool, id, &input).await?;
    tracing::info!(vaccine_id = id, patient_id = vaccine.patient_id, "Vaccine updated");
    Ok(Json(projection::vaccine_view(&state.pool, &vaccine).await?))
}

/// DELETE /vaccines/{id}
///
/// Responds with the vaccine as it was just before deletion; its doses are
/// removed with it.
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<VaccineView>> {
    let (vaccine, patient) = VaccineRepo::delete(&state.pool, id).await?;
    tracing::info!(vaccine_id = id, patient_id = patient.id, "Vaccine deleted");
    Ok(Json(VaccineView::new(&vaccine, &patient)))
}
