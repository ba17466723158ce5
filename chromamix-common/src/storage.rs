//! Key-value storage port
//!
//! Everything ChromaMix persists (recipe cache, saved palette, preferences)
//! goes through [`KeyValueStore`]. The service uses [`SqliteStore`]; tests
//! and embedders can use [`MemoryStore`].

use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// String key → string value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written or was removed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key (no-op if absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

#[cfg(feature = "sqlx")]
mod sqlite {
    use super::KeyValueStore;
    use crate::Result;
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use std::path::Path;

    /// SQLite-backed store using a single `kv_store` table
    #[derive(Debug, Clone)]
    pub struct SqliteStore {
        pool: SqlitePool,
    }

    impl SqliteStore {
        /// Open (or create) the database file at `db_path`
        pub async fn open(db_path: &Path) -> Result<Self> {
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
            tracing::debug!("Connecting to database: {}", db_url);

            let pool = SqlitePool::connect(&db_url).await?;
            Self::from_pool(pool).await
        }

        /// Private in-memory database
        ///
        /// Pinned to one connection: every SQLite `:memory:` connection is a
        /// separate database.
        pub async fn in_memory() -> Result<Self> {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await?;
            Self::from_pool(pool).await
        }

        /// Wrap an existing pool, creating the table if needed
        pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )
                "#,
            )
            .execute(&pool)
            .await?;

            Ok(Self { pool })
        }

        pub fn pool(&self) -> &SqlitePool {
            &self.pool
        }
    }

    #[async_trait]
    impl KeyValueStore for SqliteStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row.map(|(value,)| value))
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            sqlx::query(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            Ok(())
        }
    }
}
