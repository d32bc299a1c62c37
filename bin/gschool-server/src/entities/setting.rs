use crate::entities::SqliteStore;
use serde_json::Value;
use std::future::Future;

/// Key → JSON value settings.  Values are stored as serialized JSON text.
pub trait SettingStore: Send + Sync + 'static {
    fn get_setting(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, sqlx::Error>> + Send;
    fn set_setting(
        &self,
        key: &str,
        value: &Value,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    fn list_settings(
        &self,
    ) -> impl Future<Output = Result<Vec<(String, Value)>, sqlx::Error>> + Send;
}

fn decode(raw: &str) -> Result<Value, sqlx::Error> {
    serde_json::from_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

impl SettingStore for SqliteStore {
    async fn get_setting(&self, key: &str) -> Result<Option<Value>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(raw,)| decode(&raw)).transpose()
    }

    async fn set_setting(&self, key: &str, value: &Value) -> Result<(), sqlx::Error> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        )
        .bind(key)
        .bind(value.to_string())
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_settings(&self) -> Result<Vec<(String, Value)>, sqlx::Error> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter()
            .map(|(key, raw)| Ok((key, decode(&raw)?)))
            .collect()
    }
}
