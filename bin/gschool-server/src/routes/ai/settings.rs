//! Global settings endpoints, guarded by the admin token when one is set.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{middleware, Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::SettingStore;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::middleware::auth;
use crate::schemas::ai::settings::{
    ListSettingsResponse, SetSettingBody, SettingEntry, SettingResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_settings, get_setting, set_setting),
    components(schemas(SettingEntry, ListSettingsResponse, SettingResponse, SetSettingBody))
)]
pub struct SettingsApi;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/{key}", get(get_setting).put(set_setting))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

#[utoipa::path(
    get,
    path = "/api/ai/settings",
    tag = "settings",
    responses(
        (status = 200, description = "All settings ordered by key", body = ListSettingsResponse),
        (status = 401, description = "Unauthorised (admin token required)"),
    )
)]
pub async fn list_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListSettingsResponse>, ServerError> {
    let settings = state.store.list_settings().await?;
    Ok(Json(ListSettingsResponse {
        ok: true,
        settings: settings
            .into_iter()
            .map(|(key, value)| SettingEntry { key, value })
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/ai/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting value", body = SettingResponse),
        (status = 401, description = "Unauthorised (admin token required)"),
        (status = 404, description = "Setting not found"),
    )
)]
pub async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<SettingResponse>, ServerError> {
    let value = state
        .store
        .get_setting(&key)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("setting '{key}' not found")))?;
    Ok(Json(SettingResponse { ok: true, key, value }))
}

#[utoipa::path(
    put,
    path = "/api/ai/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    request_body = SetSettingBody,
    responses(
        (status = 200, description = "Setting stored", body = SettingResponse),
        (status = 401, description = "Unauthorised (admin token required)"),
    )
)]
pub async fn set_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    ApiJson(body): ApiJson<SetSettingBody>,
) -> Result<Json<SettingResponse>, ServerError> {
    state.store.set_setting(&key, &body.value).await?;
    info!(%key, "setting updated");
    Ok(Json(SettingResponse {
        ok: true,
        key,
        value: body.value,
    }))
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::routes::test_support::{app, app_with, call};
    use axum::http::{Method, StatusCode};
    use gschool_classifier::KeywordClassifier;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn put_then_get_and_list() {
        let (app, _) = app().await;
        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/ai/settings/quiet_hours",
            Some(json!({ "value": { "from": 22, "to": 7 } })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"]["from"], 22);

        let (_, body) = call(&app, Method::GET, "/api/ai/settings/quiet_hours", None, None).await;
        assert_eq!(body, json!({ "ok": true, "key": "quiet_hours", "value": { "from": 22, "to": 7 } }));

        let (_, body) = call(&app, Method::GET, "/api/ai/settings", None, None).await;
        assert_eq!(body["settings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let (app, _) = app().await;
        let (status, body) = call(&app, Method::GET, "/api/ai/settings/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn admin_token_guards_settings_only() {
        let config = Config {
            enable_swagger: false,
            admin_token: Some("s3cret".into()),
            ..Config::default()
        };
        let (app, _) = app_with(config, Arc::new(KeywordClassifier::new())).await;

        let (status, _) = call(&app, Method::GET, "/api/ai/settings", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = call(&app, Method::GET, "/api/ai/settings", None, Some("wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = call(&app, Method::GET, "/api/ai/settings", None, Some("s3cret")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(&app, Method::GET, "/api/ai/categories", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
