//! Authentication service.
//!
//! Password registration and sign-in for every role. A successful sign-in
//! writes a [`CurrentUser`] into the session; the role it carries is the
//! only authorization claim the rest of the app looks at.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tower_sessions::Session;

use ila_beauty_core::{Email, UserRole};

use crate::db::{KeyValueStore, RepositoryError, UserRepository};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Account created and signed in.
    SignedIn(User),
    /// Reseller account created; no session until an admin approves it.
    PendingApproval(User),
}

impl Registration {
    /// The created account.
    #[must_use]
    pub const fn user(&self) -> &User {
        match self {
            Self::SignedIn(user) | Self::PendingApproval(user) => user,
        }
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a customer or reseller.
    ///
    /// Customers are signed in straight away. Resellers are stored unapproved
    /// at the brown stage and the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RoleNotAllowed` for the admin role.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        session: &Session,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<Registration, AuthError> {
        if !role.is_self_service() {
            return Err(AuthError::RoleNotAllowed(role));
        }

        let user = self.create_account(email, password, role).await?;

        if !user.can_sign_in() {
            tracing::info!(user_id = %user.id, "Reseller registered, awaiting approval");
            return Ok(Registration::PendingApproval(user));
        }

        session.cycle_id().await?;
        set_current_user(session, &CurrentUser::from(&user)).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(Registration::SignedIn(user))
    }

    /// Create an admin account. Only reachable from the operator CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`], minus the role check.
    pub async fn create_admin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.create_account(email, password, UserRole::Admin).await
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = User::new(email, role);
        self.users
            .create(&user, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account has this email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    /// Returns `AuthError::PendingApproval` if the account is an unapproved reseller.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self.authenticate(email, password).await?;
        if !user.can_sign_in() {
            return Err(AuthError::PendingApproval);
        }

        session.cycle_id().await?;
        set_current_user(session, &CurrentUser::from(&user)).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
        Ok(user)
    }

    /// Sign in to the admin console.
    ///
    /// Unknown emails and valid credentials for a non-admin account are both
    /// rejected as invalid.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown, the
    /// password is wrong, or the account is not an admin.
    pub async fn admin_login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self
            .authenticate(email, password)
            .await
            .map_err(|e| match e {
                AuthError::UserNotFound => AuthError::InvalidCredentials,
                other => other,
            })?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "Non-admin attempted admin sign-in");
            return Err(AuthError::InvalidCredentials);
        }

        session.cycle_id().await?;
        set_current_user(session, &CurrentUser::from(&user)).await?;
        tracing::info!(user_id = %user.id, "Admin signed in");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Sign out, dropping all session data. A no-op when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session store fails.
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        clear_current_user(session).await?;
        Ok(())
    }
}

/// Validate password requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password doesn't match.
/// Returns `AuthError::PasswordHash` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
