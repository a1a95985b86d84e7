//! Admin account management.
//!
//! Admin accounts cannot be registered through the storefront; this is the
//! only way to create one.

use ila_beauty_storefront::db::KeyValueStore;
use ila_beauty_storefront::models::User;
use ila_beauty_storefront::services::AuthService;

use super::{CommandError, open_store};

/// Create an admin account in the configured store.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the email is invalid or
/// taken, or the password is too short.
pub async fn create(email: &str, password: &str) -> Result<(), CommandError> {
    let store = open_store("admin create").await?;
    let admin = create_in(store.as_ref(), email, password).await?;
    tracing::info!(user_id = %admin.id, email = %admin.email, "Admin account created");
    Ok(())
}

async fn create_in(
    store: &dyn KeyValueStore,
    email: &str,
    password: &str,
) -> Result<User, CommandError> {
    Ok(AuthService::new(store)
        .create_admin(email, password)
        .await?)
}
