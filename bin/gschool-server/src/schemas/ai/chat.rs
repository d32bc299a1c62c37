use crate::entities::ChatMessage;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Defaults to `"*"`.
    pub room: Option<String>,
    /// Defaults to `"unknown"`.
    pub user_id: Option<String>,
    /// Defaults to `"student"`.
    pub role: Option<String>,
    /// Trimmed and cut to 1000 characters; must not be blank.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponse {
    pub ok: bool,
    /// Server timestamp of the stored message, in milliseconds.
    pub ts: i64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PollQuery {
    /// Room to read; defaults to `"*"`.
    pub room: Option<String>,
    /// Only messages with `ts` strictly greater than this are returned.
    #[param(value_type = Option<i64>)]
    pub since: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PolledMessage {
    pub user_id: String,
    pub role: String,
    pub text: String,
    pub ts: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PollResponse {
    pub ok: bool,
    pub messages: Vec<PolledMessage>,
}

impl ChatMessage {
    pub fn to_response(&self) -> PolledMessage {
        PolledMessage {
            user_id: self.user_id.clone(),
            role: self.role.clone(),
            text: self.text.clone(),
            ts: self.ts,
        }
    }
}
