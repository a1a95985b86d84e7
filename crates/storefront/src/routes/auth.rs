//! Authentication route handlers.
//!
//! One page with sign-in and registration forms. Form posts redirect back
//! to `/auth` with a notice code on failure.

use std::str::FromStr;

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

use ila_beauty_core::UserRole;

use super::notice::{MessageQuery, Notice, with_error, with_success};
use super::views::Nav;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::services::{AuthError, AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: String,
}

/// Query parameters for the auth page.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub tab: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in / registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub nav: Nav,
    pub notice: Option<Notice>,
    pub register_tab: bool,
}

const LOGIN_PAGE: &str = "/auth";
const REGISTER_PAGE: &str = "/auth?tab=register";

// =============================================================================
// Handlers
// =============================================================================

/// Display the sign-in page. Signed-in users go to their account.
pub async fn auth_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<AuthQuery>,
) -> Result<AuthTemplate, Redirect> {
    if user.is_some() {
        return Err(Redirect::to("/account"));
    }

    let notice = MessageQuery {
        error: query.error,
        success: query.success,
    }
    .notice();

    Ok(AuthTemplate {
        nav: Nav::default(),
        notice,
        register_tab: query.tab.as_deref() == Some("register"),
    })
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    match AuthService::new(state.store())
        .login(&session, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Redirect::to(&with_success("/account", "signed_in"))
        }
        Err(e) => Redirect::to(&with_error(LOGIN_PAGE, rejection_code(&e))),
    }
}

/// Handle registration form submission.
///
/// Customers land on their account page; resellers are sent back to the
/// sign-in tab with a pending-approval notice.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Redirect {
    if form.password != form.password_confirm {
        return Redirect::to(&with_error(REGISTER_PAGE, "password_mismatch"));
    }

    let Ok(role) = UserRole::from_str(&form.role) else {
        return Redirect::to(&with_error(REGISTER_PAGE, "role"));
    };

    match AuthService::new(state.store())
        .register(&session, &form.email, &form.password, role)
        .await
    {
        Ok(Registration::SignedIn(user)) => {
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Redirect::to(&with_success("/account", "registered"))
        }
        Ok(Registration::PendingApproval(_)) => {
            Redirect::to(&with_success(LOGIN_PAGE, "pending_approval"))
        }
        Err(e) => Redirect::to(&with_error(REGISTER_PAGE, rejection_code(&e))),
    }
}

/// Handle logout. Always succeeds from the visitor's point of view.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Err(e) = AuthService::new(state.store()).logout(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();
    Redirect::to(&with_success("/", "signed_out"))
}

/// Log an auth failure at the right level and return its notice code.
pub(crate) fn rejection_code(err: &AuthError) -> &'static str {
    if err.is_internal() {
        tracing::error!(error = %err, "Authentication failed");
    } else {
        tracing::warn!(error = %err, "Authentication rejected");
    }
    err.notice_code()
}
