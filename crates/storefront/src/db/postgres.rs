//! `PostgreSQL`-backed key-value store.
//!
//! Every entry is a row in `kv_entry`, with the document in a `JSONB` column.
//! Runtime-checked queries are used so the crate builds without a database.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{KeyValueStore, RepositoryError};

/// Schema for the key-value table.
const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv_entry (
    key        TEXT PRIMARY KEY,
    value      JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Key-value store on a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (shared with the session store).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `kv_entry` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PostgresStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        let value = sqlx::query_scalar::<_, Value>("SELECT value FROM kv_entry WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO kv_entry (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = now()
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO kv_entry (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO NOTHING
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, key: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM kv_entry WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, Value)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT key, value FROM kv_entry WHERE starts_with(key, $1) ORDER BY key",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
