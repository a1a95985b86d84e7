//! Schema setup for the `PostgreSQL` backend.
//!
//! Creates the `kv_entry` table used by every repository and the
//! `tower_sessions` table used by the session layer. Both statements are
//! idempotent, so the command is safe to re-run on every deploy.
//!
//! The hosted backend manages its own schema and is rejected here.

use ila_beauty_storefront::config::{StoreBackend, StorefrontConfig};
use ila_beauty_storefront::db::{self, PostgresStore};

use super::CommandError;

/// Run all migrations.
///
/// # Errors
///
/// Returns an error if the backend is not `PostgreSQL` or a statement fails.
pub async fn run() -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let StoreBackend::Postgres { database_url } = &config.store else {
        return Err(CommandError::Backend {
            command: "migrate",
            needs: "postgres backend",
            env: "STOREFRONT_DATABASE_URL",
        });
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    tracing::info!("Creating key-value table...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Creating session table...");
    tower_sessions_sqlx_store::PostgresStore::new(pool)
        .migrate()
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
