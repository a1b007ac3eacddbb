//! Route definitions for the `/doses` resource. Doses are leaves, so
//! deleting one never cascades.

use axum::routing::get;
use axum::Router;

use crate::handlers::dose;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dose::list).post(dose::create))
        .route(
            "/{id}",
            get(dose::get_by_id)
                .put(dose::update)
                .delete(dose::delete),
        )
}
