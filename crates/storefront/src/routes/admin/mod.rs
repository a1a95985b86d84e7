//! Admin console routes.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::RequireAdmin):
//! signed-out visitors are sent to `/admin-login`, other roles to `/`.
//!
//! ```text
//! GET  /admin                          - Dashboard (reseller management)
//! GET  /admin/users?role=              - Users, optionally filtered by role
//! POST /admin/users/{id}/approval      - Approve or revoke a reseller
//! POST /admin/users/{id}/stage         - Assign a reseller stage
//! GET  /admin/products                 - Product list with edit forms
//! POST /admin/products                 - Create product
//! POST /admin/products/{id}            - Update product
//! POST /admin/products/{id}/delete     - Delete product
//! GET  /admin/categories               - Category list with edit forms
//! POST /admin/categories               - Create category
//! POST /admin/categories/{id}          - Update category
//! POST /admin/categories/{id}/delete   - Delete category
//! ```

pub mod categories;
pub mod dashboard;
pub mod login;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::models::CurrentUser;
use crate::services::AdminError;
use crate::state::AppState;

/// Admin header data.
#[derive(Debug, Clone)]
pub struct AdminNav {
    pub email: String,
    pub current_path: &'static str,
}

impl AdminNav {
    #[must_use]
    pub fn new(admin: &CurrentUser, current_path: &'static str) -> Self {
        Self {
            email: admin.email.to_string(),
            current_path,
        }
    }
}

/// Create the admin console router (mounted at `/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/users", get(users::index))
        .route("/users/{id}/approval", post(users::set_approval))
        .route("/users/{id}/stage", post(users::set_stage))
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/delete", post(products::delete))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route("/categories/{id}", post(categories::update))
        .route("/categories/{id}/delete", post(categories::delete))
}

/// Where to send the admin after a form post. Only admin pages qualify.
fn return_path(requested: Option<&str>) -> &str {
    requested
        .filter(|path| path.starts_with("/admin") && !path.starts_with("//"))
        .unwrap_or("/admin")
}

/// Log an admin failure at the right level and return its notice code.
fn rejection_code(err: &AdminError) -> &'static str {
    match err {
        AdminError::Repository(e) => tracing::error!(error = %e, "Admin action failed"),
        other => tracing::warn!(error = %other, "Admin action rejected"),
    }
    err.notice_code()
}

/// Blank form fields count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_path_stays_in_admin() {
        assert_eq!(return_path(Some("/admin/users?role=reseller")), "/admin/users?role=reseller");
        assert_eq!(return_path(Some("https://evil.example")), "/admin");
        assert_eq!(return_path(Some("/account")), "/admin");
        assert_eq!(return_path(None), "/admin");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_owned())), None);
        assert_eq!(non_empty(Some(" x ".to_owned())), Some("x".to_owned()));
        assert_eq!(non_empty(None), None);
    }
}
