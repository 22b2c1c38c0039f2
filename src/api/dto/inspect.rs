//! DTOs for the code inspection endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full URL stored behind a short code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FullUrlResponse {
    pub full_url: String,
}
