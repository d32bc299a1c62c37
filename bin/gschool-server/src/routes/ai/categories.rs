//! Category block-policy endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

use crate::entities::CategoryStore;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::ai::categories::{
    CategoryResponse, ListCategoriesResponse, UpsertCategoryRequest,
};
use crate::schemas::OkResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, upsert_category),
    components(schemas(
        CategoryResponse,
        ListCategoriesResponse,
        UpsertCategoryRequest,
        OkResponse
    ))
)]
pub struct CategoriesApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/categories", get(list_categories).post(upsert_category))
}

#[utoipa::path(
    get,
    path = "/api/ai/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories ordered by name", body = ListCategoriesResponse),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListCategoriesResponse>, ServerError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(ListCategoriesResponse {
        ok: true,
        categories: categories.iter().map(|c| c.to_response()).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/ai/categories",
    tag = "categories",
    request_body = UpsertCategoryRequest,
    responses(
        (status = 200, description = "Category created or updated", body = OkResponse),
        (status = 400, description = "Missing name"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn upsert_category(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpsertCategoryRequest>,
) -> Result<Json<OkResponse>, ServerError> {
    req.validate()?;
    let blocked = req.is_blocked();
    let name = req.name.unwrap_or_default();

    state
        .store
        .upsert_category(&name, blocked, req.block_url.as_deref())
        .await?;
    info!(%name, blocked, block_url = ?req.block_url, "category policy updated");
    Ok(Json(OkResponse::ok()))
}

#[cfg(test)]
mod test {
    use crate::routes::test_support::{app, call};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn second_upsert_replaces_the_first() {
        let (app, _) = app().await;
        let uri = "/api/ai/categories";
        let first = json!({ "name": "games", "blocked": true, "block_url": "https://b.test" });
        let (status, body) = call(&app, Method::POST, uri, Some(first), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let second = json!({ "name": "games", "blocked": 0 });
        call(&app, Method::POST, uri, Some(second), None).await;

        let (_, body) = call(&app, Method::GET, uri, None, None).await;
        let games: Vec<_> = body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|c| c["name"] == "games")
            .collect();
        assert_eq!(games.len(), 1);
        assert_eq!(*games[0], json!({ "name": "games", "blocked": false, "block_url": null }));
    }

    #[tokio::test]
    async fn missing_name_is_a_client_error() {
        let (app, _) = app().await;
        for body in [json!({ "blocked": true }), json!({ "name": "" })] {
            let (status, body) =
                call(&app, Method::POST, "/api/ai/categories", Some(body), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "ok": false, "error": "name required" }));
        }
    }

    #[tokio::test]
    async fn mistyped_name_uses_the_error_shape() {
        let (app, _) = app().await;
        let (status, body) =
            call(&app, Method::POST, "/api/ai/categories", Some(json!({ "name": 5 })), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["ok"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let (app, _) = app().await;
        for name in ["zeta", "alpha", "mid"] {
            call(&app, Method::POST, "/api/ai/categories", Some(json!({ "name": name })), None).await;
        }
        let (status, body) = call(&app, Method::GET, "/api/ai/categories", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        let names: Vec<&str> = body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["name"].as_str())
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }
}
