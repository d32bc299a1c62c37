//! Request extractors whose rejections use the `{"ok": false, "error": ...}`
//! shape of [`ServerError`].

use axum::extract::FromRequest;

use crate::error::ServerError;

/// [`axum::Json`] with rejections converted through [`ServerError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
