//! User management: role-filtered listing, reseller approval and stage.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use ila_beauty_core::{ResellerStage, UserId, UserRole};

use super::{AdminNav, rejection_code, return_path};
use crate::middleware::RequireAdmin;
use crate::models::{ApprovalState, User};
use crate::routes::notice::{MessageQuery, Notice, with_error, with_success};
use crate::routes::views::SelectOption;
use crate::services::ResellerService;
use crate::state::AppState;

/// A user row in admin tables.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub role: &'static str,
    pub status: &'static str,
    pub status_class: &'static str,
    pub is_reseller: bool,
    pub approved: bool,
    pub stage: Option<&'static str>,
    pub stage_options: Vec<SelectOption>,
    pub joined: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let state = user.approval_state();
        let stage_options = if user.is_reseller() {
            ResellerStage::ALL
                .iter()
                .map(|stage| SelectOption {
                    value: stage.as_str().to_owned(),
                    label: stage.label().to_owned(),
                    selected: user.reseller_stage == Some(*stage),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            role: user.role.as_str(),
            status: state.label(),
            status_class: match state {
                ApprovalState::Pending => "badge badge-pending",
                ApprovalState::Approved | ApprovalState::AutoApproved => "badge badge-active",
            },
            is_reseller: user.is_reseller(),
            approved: user.approved,
            stage: user.stage_label(),
            stage_options,
            joined: user.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Role filter tab.
#[derive(Debug, Clone)]
pub struct RoleTab {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Users page query.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub role: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Users page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub admin: AdminNav,
    pub notice: Option<Notice>,
    pub tabs: Vec<RoleTab>,
    pub users: Vec<UserRow>,
    pub return_to: String,
}

/// Approval form data.
#[derive(Debug, Deserialize)]
pub struct ApprovalForm {
    pub approved: bool,
    pub return_to: Option<String>,
}

/// Stage form data.
#[derive(Debug, Deserialize)]
pub struct StageForm {
    pub stage: String,
    pub return_to: Option<String>,
}

fn role_tabs(active: Option<UserRole>) -> Vec<RoleTab> {
    [
        ("All", "/admin/users", None),
        ("Customers", "/admin/users?role=customer", Some(UserRole::Customer)),
        ("Resellers", "/admin/users?role=reseller", Some(UserRole::Reseller)),
        ("Admins", "/admin/users?role=admin", Some(UserRole::Admin)),
    ]
    .into_iter()
    .map(|(label, href, role)| RoleTab {
        label,
        href,
        active: role == active,
    })
    .collect()
}

/// Users list handler.
///
/// An unknown `role` value shows everyone.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> UsersTemplate {
    let role = query
        .role
        .as_deref()
        .and_then(|r| UserRole::from_str(r).ok());
    let mut notice = MessageQuery {
        error: query.error,
        success: query.success,
    }
    .notice();

    let users = match ResellerService::new(state.store()).list_users(role).await {
        Ok(users) => users.iter().map(UserRow::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load users");
            notice = Some(Notice::load_failed());
            Vec::new()
        }
    };

    let return_to = role.map_or_else(
        || "/admin/users".to_owned(),
        |role| format!("/admin/users?role={role}"),
    );

    UsersTemplate {
        admin: AdminNav::new(&admin, "/admin/users"),
        notice,
        tabs: role_tabs(role),
        users,
        return_to,
    }
}

/// Approve or revoke a reseller.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn set_approval(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Form(form): Form<ApprovalForm>,
) -> Redirect {
    let back = return_path(form.return_to.as_deref());
    match ResellerService::new(state.store())
        .set_approval(id, form.approved)
        .await
    {
        Ok(_) => {
            let code = if form.approved { "approved" } else { "revoked" };
            Redirect::to(&with_success(back, code))
        }
        Err(e) => Redirect::to(&with_error(back, rejection_code(&e))),
    }
}

/// Assign a reseller stage.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn set_stage(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Form(form): Form<StageForm>,
) -> Redirect {
    let back = return_path(form.return_to.as_deref());
    let Ok(stage) = ResellerStage::from_str(&form.stage) else {
        return Redirect::to(&with_error(back, "invalid"));
    };

    match ResellerService::new(state.store()).set_stage(id, stage).await {
        Ok(_) => Redirect::to(&with_success(back, "stage_updated")),
        Err(e) => Redirect::to(&with_error(back, rejection_code(&e))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ila_beauty_core::Email;

    use super::*;

    #[test]
    fn test_reseller_row() {
        let user = User::new(Email::parse("shop@example.com").unwrap(), UserRole::Reseller);
        let row = UserRow::from(&user);
        assert!(row.is_reseller);
        assert_eq!(row.status, "Pending");
        assert_eq!(row.stage, Some("Brown"));
        assert_eq!(row.stage_options.len(), 3);
        assert!(row.stage_options.iter().any(|o| o.selected && o.value == "brown"));
    }

    #[test]
    fn test_customer_row_has_no_controls() {
        let user = User::new(Email::parse("jane@example.com").unwrap(), UserRole::Customer);
        let row = UserRow::from(&user);
        assert!(!row.is_reseller);
        assert_eq!(row.status, "Active");
        assert!(row.stage_options.is_empty());
    }

    #[test]
    fn test_role_tabs_mark_active() {
        let tabs = role_tabs(Some(UserRole::Reseller));
        let active: Vec<_> = tabs.iter().filter(|t| t.active).map(|t| t.label).collect();
        assert_eq!(active, ["Resellers"]);
        assert!(role_tabs(None)[0].active);
    }
}
