//! Authentication error types.

use thiserror::Error;

use ila_beauty_core::UserRole;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ila_beauty_core::EmailError),

    /// Wrong password, or a non-admin using the admin sign-in.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account for this email.
    #[error("user not found")]
    UserNotFound,

    /// Email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Reseller account has not been approved yet.
    #[error("account pending approval")]
    PendingApproval,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Role cannot be chosen at sign-up.
    #[error("role {0} cannot self-register")]
    RoleNotAllowed(UserRole),

    /// Session could not be read or written.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Short code carried in redirect query strings for user-facing notices.
    #[must_use]
    pub const fn notice_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "invalid_email",
            Self::InvalidCredentials => "credentials",
            Self::UserNotFound => "user_not_found",
            Self::EmailTaken => "email_taken",
            Self::PendingApproval => "pending_approval",
            Self::WeakPassword(_) => "password_too_short",
            Self::RoleNotAllowed(_) => "role",
            Self::Session(_) | Self::Repository(_) | Self::PasswordHash => "failed",
        }
    }

    /// Whether the failure is on our side rather than the user's input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Session(_) | Self::Repository(_) | Self::PasswordHash
        )
    }
}
