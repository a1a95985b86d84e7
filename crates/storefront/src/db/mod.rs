//! Persistence for the storefront.
//!
//! All storefront data lives in a single key-value namespace behind the
//! [`KeyValueStore`] trait. The application holds it as a trait object so the
//! backend can be swapped without touching repositories or services.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used by tests and local development
//! - [`PostgresStore`] - `kv_entry` table in `PostgreSQL`
//! - [`HostedStore`] - the same table behind a hosted REST backend
//!
//! # Key Layout
//!
//! - `users/{id}` - user record including password hash
//! - `user_emails/{email}` - unique email index, value is the user id
//! - `products/{id}` - catalog product
//! - `categories/{id}` - catalog category
//! - `newsletter/{email}` - newsletter subscription

pub mod catalog;
pub mod hosted;
pub mod memory;
pub mod newsletter;
pub mod postgres;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::{CategoryRepository, ProductRepository};
pub use hosted::HostedStore;
pub use memory::MemoryStore;
pub use newsletter::SubscriberRepository;
pub use postgres::PostgresStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Hosted backend request failed.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Hosted backend rejected the request or returned an unexpected body.
    #[error("backend error: {0}")]
    Backend(String),

    /// Value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Injected key-value capability backing every repository.
///
/// Values are JSON documents. Implementations must make [`insert`] atomic:
/// of two concurrent inserts for the same key exactly one returns `true`.
///
/// [`insert`]: KeyValueStore::insert
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: Value) -> Result<(), RepositoryError>;

    /// Store `value` under `key` only if the key is absent.
    ///
    /// Returns `false` when the key already existed.
    async fn insert(&self, key: &str, value: Value) -> Result<bool, RepositoryError>;

    /// Delete `key`. Returns `false` when it did not exist.
    async fn remove(&self, key: &str) -> Result<bool, RepositoryError>;

    /// All entries whose key starts with `prefix`, ordered by key.
    async fn scan(&self, prefix: &str) -> Result<Vec<(String, Value)>, RepositoryError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Load and decode a single document.
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    store
        .get(key)
        .await?
        .map(|value| decode(key, value))
        .transpose()
}

/// Load and decode every document under `prefix`.
pub(crate) async fn load_all<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    prefix: &str,
) -> Result<Vec<T>, RepositoryError> {
    store
        .scan(prefix)
        .await?
        .into_iter()
        .map(|(key, value)| decode(&key, value))
        .collect()
}

/// Encode and overwrite a single document.
pub(crate) async fn save<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), RepositoryError> {
    let value = serde_json::to_value(value)?;
    store.put(key, value).await
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, RepositoryError> {
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid document at {key}: {e}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, "docs/1", &Doc { name: "a".into() }).await.unwrap();

        let doc: Option<Doc> = load(&store, "docs/1").await.unwrap();
        assert_eq!(doc, Some(Doc { name: "a".into() }));

        let missing: Option<Doc> = load(&store, "docs/2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_load_reports_corruption() {
        let store = MemoryStore::new();
        store.put("docs/1", json!({"wrong": 1})).await.unwrap();

        let result: Result<Option<Doc>, _> = load(&store, "docs/1").await;
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[tokio::test]
    async fn test_load_all_only_reads_prefix() {
        let store = MemoryStore::new();
        save(&store, "docs/1", &Doc { name: "a".into() }).await.unwrap();
        save(&store, "docs/2", &Doc { name: "b".into() }).await.unwrap();
        store.put("other/1", json!("x")).await.unwrap();

        let docs: Vec<Doc> = load_all(&store, "docs/").await.unwrap();
        assert_eq!(docs.len(), 2);
    }
}
