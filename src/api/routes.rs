//! API route configuration.

use crate::api::handlers::{generate_handler, health_handler, inspect_handler};
use crate::api::openapi::{docs_handler, openapi_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortener API routes.
///
/// # Endpoints
///
/// - `POST /generate`     - Create or fetch the short code of a URL
/// - `GET  /get/{code}`   - Full URL behind a code
/// - `GET  /health`       - Store connectivity
/// - `GET  /openapi.json` - OpenAPI document
/// - `GET  /docs`         - Swagger UI
///
/// The catch-all redirect `GET /{code}` is mounted by [`crate::routes::app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/get/{code}", get(inspect_handler))
        .route("/health", get(health_handler))
        .route("/openapi.json", get(openapi_handler))
        .route("/docs", get(docs_handler))
}
