//! User repository.
//!
//! Users are stored one document per key under `users/`, with a unique
//! email index under `user_emails/`. The index entry is claimed with an
//! atomic insert before the record is written, which keeps emails unique
//! even when two registrations race.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ila_beauty_core::{Email, UserId, UserRole};

use super::{KeyValueStore, RepositoryError, load, load_all, save};
use crate::models::User;

const USER_PREFIX: &str = "users/";
const EMAIL_INDEX_PREFIX: &str = "user_emails/";

/// Persisted form of a user: the domain record plus credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(flatten)]
    user: User,
    password_hash: String,
}

fn user_key(id: UserId) -> String {
    format!("{USER_PREFIX}{id}")
}

fn email_key(email: &Email) -> String {
    format!("{EMAIL_INDEX_PREFIX}{}", email.normalized())
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored record is invalid,
    /// or the backend error if the read fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let record: Option<UserRecord> = load(self.store, &user_key(id)).await?;
        Ok(record.map(|r| r.user))
    }

    /// Get a user by their email address (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the index points at an
    /// invalid id, or the backend error if a read fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.get_record_by_email(email).await?.map(|r| r.user))
    }

    /// Get a user together with their password hash.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_by_email`].
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        Ok(self
            .get_record_by_email(email)
            .await?
            .map(|r| (r.user, r.password_hash)))
    }

    async fn get_record_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let Some(id) = self.store.get(&email_key(email)).await? else {
            return Ok(None);
        };

        let id = id
            .as_str()
            .and_then(|s| s.parse::<UserId>().ok())
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("invalid email index for {email}"))
            })?;

        load(self.store, &user_key(id)).await
    }

    /// Create a new user with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    pub async fn create(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let index_key = email_key(&user.email);
        let claimed = self
            .store
            .insert(&index_key, Value::String(user.id.to_string()))
            .await?;
        if !claimed {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let record = UserRecord {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        };
        if let Err(e) = save(self.store, &user_key(user.id), &record).await {
            // Release the email so the address is not locked out by a failed write.
            if let Err(cleanup) = self.store.remove(&index_key).await {
                tracing::error!(error = %cleanup, "Failed to release email index");
            }
            return Err(e);
        }

        Ok(())
    }

    /// Overwrite a user's record, keeping the stored password hash.
    ///
    /// Email changes are not supported; the index is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let key = user_key(user.id);
        let mut record: UserRecord = load(self.store, &key)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        record.user = user.clone();
        save(self.store, &key, &record).await
    }

    /// List users, optionally restricted to one role, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if any record is invalid.
    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, RepositoryError> {
        let records: Vec<UserRecord> = load_all(self.store, USER_PREFIX).await?;
        let mut users: Vec<User> = records
            .into_iter()
            .map(|r| r.user)
            .filter(|u| role.is_none_or(|role| u.role == role))
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ila_beauty_core::ResellerStage;

    use super::*;
    use crate::db::MemoryStore;

    fn user(email: &str, role: UserRole) -> User {
        User::new(Email::parse(email).unwrap(), role)
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        let jane = user("jane@example.com", UserRole::Customer);
        repo.create(&jane, "hash").await.unwrap();

        assert_eq!(repo.get_by_id(jane.id).await.unwrap(), Some(jane.clone()));
        let by_email = repo
            .get_by_email(&Email::parse("JANE@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email, Some(jane.clone()));

        let (found, hash) = repo
            .get_password_hash(&jane.email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, jane.id);
        assert_eq!(hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(&user("jane@example.com", UserRole::Customer), "h1")
            .await
            .unwrap();

        let result = repo
            .create(&user("Jane@Example.com", UserRole::Reseller), "h2")
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(repo.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_password_hash() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        let mut reseller = user("shop@example.com", UserRole::Reseller);
        repo.create(&reseller, "secret-hash").await.unwrap();

        reseller.approved = true;
        reseller.reseller_stage = Some(ResellerStage::Gold);
        repo.update(&reseller).await.unwrap();

        let (stored, hash) = repo
            .get_password_hash(&reseller.email)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.approved);
        assert_eq!(stored.reseller_stage, Some(ResellerStage::Gold));
        assert_eq!(hash, "secret-hash");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        let result = repo
            .update(&user("ghost@example.com", UserRole::Customer))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_filters_by_role() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(&user("a@example.com", UserRole::Customer), "h")
            .await
            .unwrap();
        repo.create(&user("b@example.com", UserRole::Reseller), "h")
            .await
            .unwrap();
        repo.create(&user("c@example.com", UserRole::Reseller), "h")
            .await
            .unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 3);
        let resellers = repo.list(Some(UserRole::Reseller)).await.unwrap();
        assert_eq!(resellers.len(), 2);
        assert!(resellers.iter().all(User::is_reseller));
    }
}
