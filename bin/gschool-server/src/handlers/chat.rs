//! Polling chat log.

use tracing::info;

use crate::entities::{ChatMessage, ChatStore, NewChatMessage};
use crate::error::ServerError;

pub const MAX_TEXT_CHARS: usize = 1000;
pub const DEFAULT_ROOM: &str = "*";
pub const DEFAULT_USER_ID: &str = "unknown";
pub const DEFAULT_ROLE: &str = "student";

/// Trim surrounding whitespace and cut to [`MAX_TEXT_CHARS`] characters.
/// Returns `None` when nothing is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_TEXT_CHARS).collect())
}

/// `value`, or `default` when missing or empty.
pub fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Parse the poll cursor. Missing or blank means `0`.
pub fn parse_since(raw: Option<&str>) -> Result<i64, ServerError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(s) => s
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("invalid since '{s}'"))),
    }
}

/// Store a message and return its timestamp (milliseconds since the epoch).
pub async fn send_message<S: ChatStore>(
    store: &S,
    room: Option<String>,
    user_id: Option<String>,
    role: Option<String>,
    text: Option<String>,
) -> Result<i64, ServerError> {
    let text = text
        .as_deref()
        .and_then(normalize_text)
        .ok_or_else(|| ServerError::BadRequest("empty".into()))?;

    let msg = NewChatMessage {
        room: or_default(room, DEFAULT_ROOM),
        user_id: or_default(user_id, DEFAULT_USER_ID),
        role: or_default(role, DEFAULT_ROLE),
        text,
        ts: chrono::Utc::now().timestamp_millis(),
    };
    let ts = msg.ts;
    let room = msg.room.clone();
    let id = store.append_message(msg).await?;
    info!(id, %room, ts, "chat message stored");
    Ok(ts)
}

/// Messages in `room` newer than `since`, oldest first.
pub async fn poll_messages<S: ChatStore>(
    store: &S,
    room: Option<String>,
    since: Option<&str>,
) -> Result<Vec<ChatMessage>, ServerError> {
    let since = parse_since(since)?;
    let room = or_default(room, DEFAULT_ROOM);
    Ok(store.messages_since(&room, since).await?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::SqliteStore;
    use tracing_test::traced_test;

    #[test]
    fn text_is_trimmed_and_truncated_to_exact_length() {
        let long = format!("  {}  ", "é".repeat(MAX_TEXT_CHARS + 50));
        let text = normalize_text(&long).unwrap();
        assert_eq!(text.chars().count(), MAX_TEXT_CHARS);
        assert_eq!(normalize_text(" hi \n").as_deref(), Some("hi"));
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text(" \t\n "), None);
    }

    #[test]
    fn since_parsing() {
        assert_eq!(parse_since(None).unwrap(), 0);
        assert_eq!(parse_since(Some("")).unwrap(), 0);
        assert_eq!(parse_since(Some("1700000000000")).unwrap(), 1_700_000_000_000);
        assert!(matches!(parse_since(Some("soon")), Err(ServerError::BadRequest(_))));
    }

    #[tokio::test]
    #[traced_test]
    async fn send_applies_defaults() {
        let store = SqliteStore::in_memory().await;
        let ts = send_message(&store, None, Some(String::new()), None, Some("hello".into()))
            .await
            .unwrap();

        let got = poll_messages(&store, None, Some("0")).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].room, DEFAULT_ROOM);
        assert_eq!(got[0].user_id, DEFAULT_USER_ID);
        assert_eq!(got[0].role, DEFAULT_ROLE);
        assert_eq!(got[0].ts, ts);
        assert!(logs_contain("chat message stored"));
    }

    #[tokio::test]
    async fn empty_text_stores_nothing() {
        let store = SqliteStore::in_memory().await;
        let err = send_message(&store, Some("A".into()), None, None, Some("   ".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(ref m) if m == "empty"));
        assert!(poll_messages(&store, Some("A".into()), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cursor_at_latest_ts_returns_nothing_new() {
        let store = SqliteStore::in_memory().await;
        let ts = send_message(&store, Some("A".into()), None, None, Some("one".into()))
            .await
            .unwrap();
        let later = poll_messages(&store, Some("A".into()), Some(&ts.to_string()))
            .await
            .unwrap();
        assert!(later.iter().all(|m| m.ts > ts));
    }
}
