//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /generate`    - Create or fetch a short code (admission-gated)
//! - `GET  /get/{code}`  - Inspect a code
//! - `GET  /health`      - Store connectivity
//! - `GET  /openapi.json`, `GET /docs` - API documentation
//! - `GET  /{code}`      - Redirect to the full URL
//!
//! Static routes take precedence over the `/{code}` catch-all.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::api_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
