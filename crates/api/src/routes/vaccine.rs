//! Route definitions for the `/vaccines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vaccine;
use crate::state::AppState;

/// Routes mounted at `/vaccines`. Same verb layout as `/patients`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vaccine::list).post(vaccine::create))
        .route(
            "/{id}",
            get(vaccine::get_by_id)
                .put(vaccine::update)
                .delete(vaccine::delete),
        )
}
