pub mod dose;
pub mod health;
pub mod patient;
pub mod vaccine;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /patients                 list, create
/// /patients/{id}            get, update, delete (cascades to vaccines and doses)
///
/// /vaccines                 list, create
/// /vaccines/{id}            get, update, delete (cascades to doses)
///
/// /doses                    list, create
/// /doses/{id}               get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/patients", patient::router())
        .nest("/vaccines", vaccine::router())
        .nest("/doses", dose::router())
}
