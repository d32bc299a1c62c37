use crate::entities::{dao::CategoryRecord, SqliteStore};
use std::future::Future;
use tracing::info;

pub trait CategoryStore: Send + Sync + 'static {
    /// All categories ordered by name.
    fn list_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<CategoryRecord>, sqlx::Error>> + Send;
    fn get_category(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<CategoryRecord>, sqlx::Error>> + Send;
    /// Create the category if absent, else overwrite its policy.
    fn upsert_category(
        &self,
        name: &str,
        blocked: bool,
        block_url: Option<&str>,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    /// Insert `names` as unblocked categories, only if the table is empty.
    /// Returns the number of rows inserted.
    fn seed_categories(
        &self,
        names: &[String],
    ) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
}

impl CategoryStore for SqliteStore {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        let rows: Vec<(String, bool, Option<String>)> =
            sqlx::query_as("SELECT name, blocked, block_url FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(name, blocked, block_url)| CategoryRecord {
                name,
                blocked,
                block_url,
            })
            .collect())
    }

    async fn get_category(&self, name: &str) -> Result<Option<CategoryRecord>, sqlx::Error> {
        let row: Option<(String, bool, Option<String>)> =
            sqlx::query_as("SELECT name, blocked, block_url FROM categories WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(name, blocked, block_url)| CategoryRecord {
            name,
            blocked,
            block_url,
        }))
    }

    async fn upsert_category(
        &self,
        name: &str,
        blocked: bool,
        block_url: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO categories (name, blocked, block_url) VALUES (?1, ?2, ?3) \
             ON CONFLICT(name) DO UPDATE SET blocked = ?2, block_url = ?3",
        )
        .bind(name)
        .bind(blocked)
        .bind(block_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn seed_categories(&self, names: &[String]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }
        let mut inserted = 0;
        for name in names {
            inserted += sqlx::query(
                "INSERT OR IGNORE INTO categories (name, blocked, block_url) VALUES (?1, 0, NULL)",
            )
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        info!(inserted, "seeded category table");
        Ok(inserted)
    }
}
