//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::api::dto::error::ErrorResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its full URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` set to the stored URL
/// - **404 Not Found**: unknown code
/// - **410 Gone**: the link expired; no redirect is performed
/// - **500 Internal Server Error**: store failure
#[utoipa::path(
    get,
    path = "/{code}",
    tag = "links",
    params(("code" = String, Path, description = "Six-character short code")),
    responses(
        (status = 302, description = "Redirect to the full URL",
            headers(("Location" = String, description = "Stored full URL"))),
        (status = 404, description = "Full URL not found", body = ErrorResponse),
        (status = 410, description = "Short link expired", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.resolution_service.redirect(&code).await?;
    debug!(%code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
