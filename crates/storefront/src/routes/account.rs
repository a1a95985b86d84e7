//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::notice::{MessageQuery, Notice};
use super::views::Nav;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::{RequireAuth, clear_current_user};
use crate::state::AppState;

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub nav: Nav,
    pub notice: Option<Notice>,
    pub email: String,
    pub role: &'static str,
    pub status: &'static str,
    pub stage: Option<&'static str>,
    pub member_since: String,
}

/// Display the account overview.
///
/// Reads the stored record so approval and stage changes show up without
/// signing in again. A session whose user is gone or no longer approved
/// is ended.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<Response, AppError> {
    let user = UserRepository::new(state.store())
        .get_by_id(current.id)
        .await?;
    let user = match user {
        Some(user) if user.can_sign_in() => user,
        stale => {
            tracing::warn!(user_id = %current.id, "Ending session for missing or unapproved user");
            if let Err(e) = clear_current_user(&session).await {
                tracing::error!(error = %e, "Failed to clear stale session");
            }
            let target = if stale.is_some() {
                "/auth?error=pending_approval"
            } else {
                "/auth"
            };
            return Ok(Redirect::to(target).into_response());
        }
    };

    Ok(AccountTemplate {
        nav: Nav::new(Some(&current)),
        notice: query.notice(),
        email: user.email.to_string(),
        role: user.role.as_str(),
        status: user.approval_state().label(),
        stage: user.stage_label(),
        member_since: user.created_at.format("%B %-d, %Y").to_string(),
    }
    .into_response())
}
