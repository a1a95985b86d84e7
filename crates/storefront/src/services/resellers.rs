//! Reseller approval and tier management.
//!
//! A reseller moves freely between pending and approved and between the
//! three stages. Nothing is promoted automatically; every change comes from
//! an admin through this service.

use ila_beauty_core::{ResellerStage, UserId, UserRole};

use super::AdminError;
use crate::db::{KeyValueStore, UserRepository};
use crate::models::User;

/// Admin operations over user accounts.
pub struct ResellerService<'a> {
    users: UserRepository<'a>,
}

impl<'a> ResellerService<'a> {
    /// Create a new reseller service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// All users, optionally filtered by role, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the users cannot be loaded.
    pub async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>, AdminError> {
        Ok(self.users.list(role).await?)
    }

    /// Approve or revoke a reseller. Setting the current value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::UserNotFound` or `AdminError::NotAReseller`.
    pub async fn set_approval(&self, id: UserId, approved: bool) -> Result<User, AdminError> {
        let mut user = self.reseller(id).await?;
        if user.approved == approved {
            return Ok(user);
        }

        user.approved = approved;
        self.users.update(&user).await?;
        tracing::info!(user_id = %id, approved, "Reseller approval changed");
        Ok(user)
    }

    /// Assign a reseller's stage. Setting the current stage is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::UserNotFound` or `AdminError::NotAReseller`.
    pub async fn set_stage(&self, id: UserId, stage: ResellerStage) -> Result<User, AdminError> {
        let mut user = self.reseller(id).await?;
        if user.reseller_stage == Some(stage) {
            return Ok(user);
        }

        user.reseller_stage = Some(stage);
        self.users.update(&user).await?;
        tracing::info!(user_id = %id, stage = %stage, "Reseller stage changed");
        Ok(user)
    }

    async fn reseller(&self, id: UserId) -> Result<User, AdminError> {
        let user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(AdminError::UserNotFound)?;

        if !user.is_reseller() {
            return Err(AdminError::NotAReseller);
        }
        Ok(user)
    }
}
