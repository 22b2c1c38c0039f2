//! DTOs for the link generation endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create or fetch the short code of a URL.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a 400 with a specific message rather than a parse error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// URL to shorten.
    #[schema(required = true, example = "https://example.com/some/long/path")]
    pub full_url: Option<String>,
    /// Caller identity for the per-user in-flight limit.
    #[schema(required = true, example = "42")]
    pub user_id: Option<String>,
}

/// Response carrying the short code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortUrlResponse {
    /// Six-character short code.
    #[schema(example = "69365b")]
    pub short_url: String,
}
