pub mod categories;
pub mod chat;
pub mod classify;
pub mod settings;

use crate::state::AppState;

use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;

/// Routes nested under `/api/ai`.  Only the settings routes sit behind the
/// admin token.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(categories::router())
        .merge(classify::router(&state.config))
        .merge(chat::router())
        .merge(settings::router(state))
}

#[derive(OpenApi)]
#[openapi()]
pub struct AiApi;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = AiApi::openapi();
    spec.merge(categories::CategoriesApi::openapi());
    spec.merge(classify::ClassifyApi::openapi());
    spec.merge(chat::ChatApi::openapi());
    spec.merge(settings::SettingsApi::openapi());
    spec
}
