//! Admin sign-in page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::set_sentry_user;
use crate::middleware::OptionalAuth;
use crate::routes::auth::rejection_code;
use crate::routes::notice::{MessageQuery, Notice, with_error, with_success};
use crate::routes::views::Nav;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Admin login form data.
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

/// Admin sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub nav: Nav,
    pub notice: Option<Notice>,
}

/// Display the admin sign-in page. Admins already signed in skip it.
pub async fn page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<AdminLoginTemplate, Redirect> {
    if user.as_ref().is_some_and(|u| u.is_admin()) {
        return Err(Redirect::to("/admin"));
    }

    Ok(AdminLoginTemplate {
        nav: Nav::new(user.as_ref()),
        notice: query.notice(),
    })
}

/// Handle admin sign-in.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AdminLoginForm>,
) -> Redirect {
    match AuthService::new(state.store())
        .admin_login(&session, &form.email, &form.password)
        .await
    {
        Ok(admin) => {
            set_sentry_user(&admin.id, Some(admin.email.as_str()));
            Redirect::to(&with_success("/admin", "welcome"))
        }
        Err(e) => {
            let code = match &e {
                AuthError::InvalidCredentials => {
                    tracing::warn!("Admin sign-in rejected");
                    "admin_credentials"
                }
                other => rejection_code(other),
            };
            Redirect::to(&with_error("/admin-login", code))
        }
    }
}
