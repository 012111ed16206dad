//! SQLite key-value store
//!
//! Scalars live in `kv_values`, set members in `kv_sets`. Each primitive is a
//! single statement.

use async_trait::async_trait;
use peerhabit_core::{KeyValueStore, PeerHabitError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the database URL
pub const ENV_DATABASE_URL: &str = "PEERHABIT_DATABASE_URL";

/// URL used when none is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

fn storage_err(e: sqlx::Error) -> PeerHabitError {
    PeerHabitError::storage(format!("SQLite: {}", e))
}

fn is_memory_url(url: &str) -> bool {
    url == ":memory:" || url.contains(":memory:") || url.contains("mode=memory")
}

/// SQLite-backed [`KeyValueStore`]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) a database
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Opening SQLite key-value store at: {}", database_url);

        let opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PeerHabitError::config(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        // Every connection to an in-memory URL gets its own database, so keep one
        let pool_opts = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_opts.connect_with(opts).await.map_err(storage_err)?;
        Ok(Self { pool })
    }

    /// Open the database named by `PEERHABIT_DATABASE_URL`, after loading any `.env` file
    pub async fn from_env() -> Result<Self> {
        peerhabit_core::load_env()?;
        let url = peerhabit_core::config::get_env_or(ENV_DATABASE_URL, DEFAULT_DATABASE_URL);
        Self::new(&url).await
    }

    /// Create tables if they do not exist
    pub async fn initialize(&self) -> Result<()> {
        debug!("Initializing SQLite key-value schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_sets (
                set_key TEXT NOT NULL,
                member TEXT NOT NULL,
                PRIMARY KEY (set_key, member)
            )
        "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        info!("SQLite key-value schema ready");
        Ok(())
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        row.map(|r| r.try_get("value").map_err(storage_err))
            .transpose()
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv_values (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    async fn set_add(&self, set_key: &str, member: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO kv_sets (set_key, member) VALUES (?, ?)")
            .bind(set_key)
            .bind(member)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn set_is_member(&self, set_key: &str, member: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM kv_sets WHERE set_key = ? AND member = ?")
            .bind(set_key)
            .bind(member)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(row.is_some())
    }

    async fn set_members(&self, set_key: &str) -> Result<HashSet<String>> {
        let rows = sqlx::query("SELECT member FROM kv_sets WHERE set_key = ?")
            .bind(set_key)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("member").map_err(storage_err))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url(":memory:"));
        assert!(is_memory_url("sqlite://file:kv?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://./robots.db"));
    }

    #[tokio::test]
    async fn test_from_env_opens_configured_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("env.db").display());
        std::env::set_var(ENV_DATABASE_URL, &url);

        let store = SqliteStore::from_env().await.unwrap();
        std::env::remove_var(ENV_DATABASE_URL);
        store.initialize().await.unwrap();
        store.set("k", "v").await.unwrap();
        store.close().await;

        assert!(dir.path().join("env.db").exists());
    }

    #[tokio::test]
    async fn test_uninitialized_store_reports_storage_error() {
        let store = SqliteStore::new(DEFAULT_DATABASE_URL).await.unwrap();
        let err = store.get("anything").await.unwrap_err();
        assert!(err.is_storage());
    }
}
