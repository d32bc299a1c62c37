use gschool_classifier::Classification;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    /// Page URL; missing is treated as `""`.
    pub url: Option<String>,
    /// Optional page HTML.
    pub html: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyResponse {
    pub ok: bool,
    pub url: String,
    /// Raw classifier output; always carries `category`.
    #[schema(value_type = Object)]
    pub result: Classification,
    pub blocked: bool,
    pub block_url: String,
}
