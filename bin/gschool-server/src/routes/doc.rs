use crate::routes::{ai, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "gschool-server",
    description = "Content-filter policy and classroom chat API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(ai::api_docs());
    root
}
