use crate::entities::{
    dao::{ChatMessage, NewChatMessage},
    SqliteStore,
};
use std::future::Future;

pub trait ChatStore: Send + Sync + 'static {
    /// Append a message and return its row id.
    fn append_message(
        &self,
        msg: NewChatMessage,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
    /// Messages in `room` with `ts > since`, oldest first.
    fn messages_since(
        &self,
        room: &str,
        since: i64,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, sqlx::Error>> + Send;
}

impl ChatStore for SqliteStore {
    async fn append_message(&self, msg: NewChatMessage) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO chat_messages (room, user_id, role, text, ts) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&msg.room)
        .bind(&msg.user_id)
        .bind(&msg.role)
        .bind(&msg.text)
        .bind(msg.ts)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn messages_since(&self, room: &str, since: i64) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let rows: Vec<(i64, String, String, String, String, i64)> = sqlx::query_as(
            "SELECT id, room, user_id, role, text, ts FROM chat_messages \
             WHERE room = ?1 AND ts > ?2 ORDER BY ts ASC, id ASC",
        )
        .bind(room)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, room, user_id, role, text, ts)| ChatMessage {
                id,
                room,
                user_id,
                role,
                text,
                ts,
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn msg(room: &str, text: &str, ts: i64) -> NewChatMessage {
        NewChatMessage {
            room: room.into(),
            user_id: "u1".into(),
            role: "student".into(),
            text: text.into(),
            ts,
        }
    }

    #[tokio::test]
    async fn poll_is_exclusive_of_cursor_and_ascending() {
        let store = SqliteStore::in_memory().await;
        for (text, ts) in [("c", 30), ("a", 10), ("b", 20), ("b2", 20)] {
            store.append_message(msg("A", text, ts)).await.unwrap();
        }

        let got = store.messages_since("A", 10).await.unwrap();
        let texts: Vec<&str> = got.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["b", "b2", "c"]);
        assert!(got.iter().all(|m| m.ts > 10));
        assert!(got.windows(2).all(|w| w[0].ts <= w[1].ts));
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let store = SqliteStore::in_memory().await;
        store.append_message(msg("A", "for a", 5)).await.unwrap();
        store.append_message(msg("B", "for b", 6)).await.unwrap();

        let got = store.messages_since("B", 0).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "for b");
        assert_eq!(got[0].room, "B");
    }

    #[tokio::test]
    async fn append_returns_increasing_ids() {
        let store = SqliteStore::in_memory().await;
        let first = store.append_message(msg("*", "1", 1)).await.unwrap();
        let second = store.append_message(msg("*", "2", 1)).await.unwrap();
        assert!(second > first);
    }
}
