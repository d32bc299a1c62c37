//! `POST /classify`: classify a page and apply the stored block policy.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::handlers::classify::classify_and_check;
use crate::config::Config;
use crate::schemas::ai::classify::{ClassifyRequest, ClassifyResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(classify),
    components(schemas(ClassifyRequest, ClassifyResponse))
)]
pub struct ClassifyApi;

/// The body limit is raised to `max_body_bytes` since the payload carries a
/// full page of HTML.
pub fn router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/classify", post(classify))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
}

#[utoipa::path(
    post,
    path = "/api/ai/classify",
    tag = "classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Category and block decision", body = ClassifyResponse),
        (status = 413, description = "Body larger than `GSCHOOL_MAX_BODY_BYTES`"),
        (status = 500, description = "Classifier or storage error"),
    )
)]
pub async fn classify(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ServerError> {
    let url = req.url.unwrap_or_default();
    let decision = classify_and_check(
        state.store.as_ref(),
        state.classifier.as_ref(),
        &state.config.default_block_redirect,
        &url,
        req.html.as_deref(),
    )
    .await?;

    info!(
        %url,
        category = %decision.classification.category,
        blocked = decision.blocked,
        "page classified"
    );
    Ok(Json(ClassifyResponse {
        ok: true,
        url,
        result: decision.classification,
        blocked: decision.blocked,
        block_url: decision.block_url,
    }))
}
