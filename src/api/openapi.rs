//! OpenAPI document and interactive docs.
//!
//! `GET /openapi.json` serves the document, `GET /docs` a Swagger UI page
//! that renders it.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::api::dto::error::ErrorResponse;
use crate::api::dto::generate::{GenerateRequest, ShortUrlResponse};
use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::api::dto::inspect::FullUrlResponse;
use crate::api::handlers::{generate, health, inspect, redirect};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "URL Shortener API",
        description = "Short link generation with per-user and global concurrency limits"
    ),
    paths(
        generate::generate_handler,
        inspect::inspect_handler,
        redirect::redirect_handler,
        health::health_handler,
    ),
    components(schemas(
        GenerateRequest,
        ShortUrlResponse,
        FullUrlResponse,
        ErrorResponse,
        HealthResponse,
        HealthChecks,
        CheckStatus,
    )),
    tags(
        (name = "links", description = "Create, inspect and follow short links"),
        (name = "health", description = "Store connectivity"),
    )
)]
pub struct ApiDoc;

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>URL Shortener API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn docs_handler() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}
