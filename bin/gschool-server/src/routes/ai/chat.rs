//! Polling chat: `POST /chat/send` and `GET /chat/poll`.
//!
//! Clients keep the largest `ts` they have seen and pass it back as `since`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::handlers::chat::{poll_messages, send_message};
use crate::schemas::ai::chat::{
    PollQuery, PollResponse, PolledMessage, SendMessageRequest, SendMessageResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(send, poll),
    components(schemas(
        SendMessageRequest,
        SendMessageResponse,
        PollResponse,
        PolledMessage
    ))
)]
pub struct ChatApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat/send", post(send))
        .route("/chat/poll", get(poll))
}

#[utoipa::path(
    post,
    path = "/api/ai/chat/send",
    tag = "chat",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = SendMessageResponse),
        (status = 400, description = "Empty text"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn send(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ServerError> {
    let ts = send_message(state.store.as_ref(), req.room, req.user_id, req.role, req.text).await?;
    Ok(Json(SendMessageResponse { ok: true, ts }))
}

#[utoipa::path(
    get,
    path = "/api/ai/chat/poll",
    tag = "chat",
    params(PollQuery),
    responses(
        (status = 200, description = "Messages newer than `since`, oldest first", body = PollResponse),
        (status = 400, description = "Malformed cursor"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn poll(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PollQuery>,
) -> Result<Json<PollResponse>, ServerError> {
    let messages = poll_messages(state.store.as_ref(), query.room, query.since.as_deref()).await?;
    Ok(Json(PollResponse {
        ok: true,
        messages: messages.iter().map(|m| m.to_response()).collect(),
    }))
}

#[cfg(test)]
mod test {
    use crate::routes::test_support::{app, call};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn sent_message_is_polled_with_defaults() {
        let (app, _) = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/ai/chat/send",
            Some(json!({ "room": "A", "text": "hi" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        let ts = body["ts"].as_i64().unwrap();

        let (status, body) = call(&app, Method::GET, "/api/ai/chat/poll?room=A&since=0", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(
            body["messages"],
            json!([{ "user_id": "unknown", "role": "student", "text": "hi", "ts": ts }])
        );
    }

    #[tokio::test]
    async fn blank_text_is_rejected_and_not_stored() {
        let (app, _) = app().await;
        for payload in [json!({ "text": "   " }), json!({ "room": "*" })] {
            let (status, body) = call(&app, Method::POST, "/api/ai/chat/send", Some(payload), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "ok": false, "error": "empty" }));
        }
        let (_, body) = call(&app, Method::GET, "/api/ai/chat/poll", None, None).await;
        assert_eq!(body["messages"], json!([]));
    }

    #[tokio::test]
    async fn mistyped_text_uses_the_error_shape() {
        let (app, _) = app().await;
        let (status, body) =
            call(&app, Method::POST, "/api/ai/chat/send", Some(json!({ "text": 1 })), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["ok"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn long_text_is_cut_to_limit() {
        let (app, _) = app().await;
        let text = "x".repeat(1500);
        call(&app, Method::POST, "/api/ai/chat/send", Some(json!({ "text": text })), None).await;

        let (_, body) = call(&app, Method::GET, "/api/ai/chat/poll?room=*", None, None).await;
        let stored = body["messages"][0]["text"].as_str().unwrap();
        assert_eq!(stored.chars().count(), 1000);
    }

    #[tokio::test]
    async fn poll_respects_cursor_and_room() {
        let (app, _) = app().await;
        let (_, first) = call(
            &app,
            Method::POST,
            "/api/ai/chat/send",
            Some(json!({ "room": "R", "text": "one" })),
            None,
        )
        .await;
        call(
            &app,
            Method::POST,
            "/api/ai/chat/send",
            Some(json!({ "room": "other", "text": "elsewhere" })),
            None,
        )
        .await;
        let ts = first["ts"].as_i64().unwrap();

        let (_, body) = call(&app, Method::GET, &format!("/api/ai/chat/poll?room=R&since={ts}"), None, None).await;
        assert!(body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .all(|m| m["ts"].as_i64().unwrap() > ts));

        let (_, body) = call(&app, Method::GET, "/api/ai/chat/poll?room=R&since=", None, None).await;
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);

        let (status, _) = call(&app, Method::GET, "/api/ai/chat/poll?since=abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
