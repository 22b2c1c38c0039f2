//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with store checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Both stores reachable
/// - **503 Service Unavailable**: One or more stores unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Link store reachable" },
///     "counters": { "status": "ok", "message": "Counter store reachable" }
///   }
/// }
/// ```
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Both stores reachable", body = HealthResponse),
        (status = 503, description = "A store is unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = if state.link_repository.health_check().await {
        CheckStatus::ok("Link store reachable")
    } else {
        CheckStatus::error("Link store unreachable")
    };

    let counters = if state.counter_store.health_check().await {
        CheckStatus::ok("Counter store reachable")
    } else {
        CheckStatus::error("Counter store unreachable")
    };

    let all_healthy = database.is_ok() && counters.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, counters },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
