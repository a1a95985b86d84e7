//! Errors for admin-console operations.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors returned by the reseller and catalog services.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No user with the given id.
    #[error("user not found")]
    UserNotFound,

    /// Approval and stage only apply to resellers.
    #[error("user is not a reseller")]
    NotAReseller,

    /// No product with the given id.
    #[error("product not found")]
    ProductNotFound,

    /// No category with the given id.
    #[error("category not found")]
    CategoryNotFound,

    /// Form input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AdminError {
    /// Short code carried in redirect query strings for notices.
    #[must_use]
    pub const fn notice_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "user_not_found",
            Self::NotAReseller => "not_reseller",
            Self::ProductNotFound => "product_not_found",
            Self::CategoryNotFound => "category_not_found",
            Self::Validation(_) => "invalid",
            Self::Repository(_) => "failed",
        }
    }
}
