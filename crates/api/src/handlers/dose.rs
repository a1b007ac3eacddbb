//! Handlers for the `/doses` resource.
//!
//! Every response embeds the vaccine and, inside it, the patient.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vaxrecord_core::error::CoreError;
use vaxrecord_db::models::dose::{CreateDose, UpdateDose};
use vaxrecord_db::repositories::DoseRepo;

use crate::error::AppResult;
use crate::extract::{Fields, ResourceId};
use crate::projection::{self, DoseView};
use crate::state::AppState;

/// POST /doses
pub async fn create(
    State(state): State<AppState>,
    Fields(input): Fields<CreateDose>,
) -> AppResult<(StatusCode, Json<DoseView>)> {
    let dose = DoseRepo::create(&state.pool, &input).await?;
    tracing::info!(dose_id = dose.id, vaccine_id = dose.vaccine_id, "Dose created");
    let view = projection::dose_view(&state.pool, &dose).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /doses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DoseView>>> {
    let doses = DoseRepo::list(&state.pool).await?;
    let views = projection::dose_views(&state.pool, &doses).await?;
    Ok(Json(views))
}

/// GET /doses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<DoseView>> {
    let dose = DoseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Dose", id })?;
    Ok(Json(projection::dose_view(&state.pool, &dose).await?))
}

/// PUT /doses/{id}
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Fields(input): Fields<UpdateDose>,
) -> AppResult<Json<DoseView>> {
    let dose = DoseRepo::update(&state.pool, id, &input).await?;
    tracing::info!(dose_id = id, vaccine_id = dose.vaccine_id, "Dose updated");
    Ok(Json(projection::dose_view(&state.pool, &dose).await?))
}

/// DELETE /doses/{id}
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<DoseView>> {
    let (dose, vaccine, patient) = DoseRepo::delete(&state.pool, id).await?;
    tracing::info!(dose_id = id, vaccine_id = vaccine.id, "Dose deleted");
    Ok(Json(DoseView::new(&dose, &vaccine, &patient)))
}
