//! Command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use thiserror::Error;

use ila_beauty_storefront::config::{ConfigError, StoreBackend, StorefrontConfig};
use ila_beauty_storefront::db::{self, HostedStore, KeyValueStore, PostgresStore, RepositoryError};
use ila_beauty_storefront::services::{AdminError, AuthError};

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("`{command}` needs the {needs} (set {env})")]
    Backend {
        command: &'static str,
        needs: &'static str,
        env: &'static str,
    },
}

/// Open the store the storefront would use with the current environment.
///
/// The in-memory backend is refused since nothing written to it outlives
/// the command.
pub async fn open_store(
    command: &'static str,
) -> Result<Arc<dyn KeyValueStore>, CommandError> {
    let config = StorefrontConfig::from_env()?;
    tracing::info!(backend = config.store.name(), "Opening store");

    match config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(&database_url).await?;
            Ok(Arc::new(PostgresStore::new(pool)))
        }
        StoreBackend::Hosted { url, api_key } => Ok(Arc::new(HostedStore::new(&url, api_key)?)),
        StoreBackend::Memory => Err(CommandError::Backend {
            command,
            needs: "a persistent store",
            env: "STOREFRONT_DATABASE_URL or HOSTED_BACKEND_URL",
        }),
    }
}
