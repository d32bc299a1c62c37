use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database cannot be reached.
    pub status: String,
    pub version: String,
    /// `"ok"` or `"unavailable"`.
    pub database: String,
    /// Active classifier, e.g. `"keyword"` or `"remote"`.
    pub classifier: String,
}
