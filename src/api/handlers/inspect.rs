//! Handler for the code inspection endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::error::ErrorResponse;
use crate::api::dto::inspect::FullUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full URL behind a short code.
///
/// # Endpoint
///
/// `GET /get/{code}`
///
/// # Response Codes
///
/// - **200 OK**: `{"full_url": "..."}`
/// - **404 Not Found**: unknown code
/// - **410 Gone**: the link expired
/// - **500 Internal Server Error**: store failure
#[utoipa::path(
    get,
    path = "/get/{code}",
    tag = "links",
    params(("code" = String, Path, description = "Six-character short code")),
    responses(
        (status = 200, description = "Full URL found", body = FullUrlResponse),
        (status = 404, description = "Full URL not found", body = ErrorResponse),
        (status = 410, description = "Short link expired", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn inspect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<FullUrlResponse>, AppError> {
    let full_url = state.resolution_service.inspect(&code).await?;

    Ok(Json(FullUrlResponse { full_url }))
}
