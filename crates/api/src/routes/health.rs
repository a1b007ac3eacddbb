//! Liveness endpoint for the record service.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Upper bound on the database round-trip made by the probe.
const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// 200 with `"status": "ok"` when Postgres answers within
/// [`DB_PROBE_TIMEOUT`], otherwise 503 with `"status": "degraded"`.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let db_healthy = match tokio::time::timeout(
        DB_PROBE_TIMEOUT,
        vaxrecord_db::health_check(&state.pool),
    )
    .await
    {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Database health probe failed");
            false
        }
        Err(_) => {
            tracing::warn!("Database health probe timed out");
            false
        }
    };

    let (status, label) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let report = HealthReport {
        status: label,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    };
    (status, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
