//! Handler for the create-or-fetch endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::error::ErrorResponse;
use crate::api::dto::generate::{GenerateRequest, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short code for a URL, creating it when needed.
///
/// # Endpoint
///
/// `POST /generate`
///
/// # Request Body
///
/// ```json
/// { "full_url": "https://example.com", "user_id": "42" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: a record was inserted or an expired one refreshed
/// - **200 OK**: an active record already existed
/// - **400 Bad Request**: missing field or malformed body
/// - **429 Too Many Requests**: global or per-user concurrency limit exceeded
/// - **500 Internal Server Error**: store failure
#[utoipa::path(
    post,
    path = "/generate",
    tag = "links",
    request_body = GenerateRequest,
    responses(
        (status = 201, description = "Short link created or refreshed", body = ShortUrlResponse),
        (status = 200, description = "Active short link already existed", body = ShortUrlResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 429, description = "Concurrency limit exceeded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;

    let outcome = state
        .resolution_service
        .create_or_fetch(payload.full_url.as_deref(), payload.user_id.as_deref())
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortUrlResponse {
            short_url: outcome.code,
        }),
    ))
}
