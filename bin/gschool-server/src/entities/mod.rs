//! Database abstraction layer.
//!
//! Each record kind has its own store trait ([`CategoryStore`],
//! [`SettingStore`], [`ChatStore`]), all implemented by [`SqliteStore`].  To
//! swap to another database, implement the traits for the new type and change
//! the concrete type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.

pub mod category;
pub mod chat;
pub mod dao;
pub mod setting;

pub use dao::{CategoryRecord, ChatMessage, NewChatMessage};

pub use category::CategoryStore;
pub use chat::ChatStore;
pub use setting::SettingStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://gschool.db"`
    /// or `"sqlite::memory:"` for tests.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = if is_memory_url(url) {
            // Every connection to an in-memory URL opens its own empty
            // database, so the pool must hold exactly one for its lifetime.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection.  Later queries fail with
    /// [`sqlx::Error::PoolClosed`].
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Fresh in-memory store with migrations applied.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        Self::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite store")
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
