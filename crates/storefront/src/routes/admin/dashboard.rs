//! Admin dashboard: catalog counts and reseller management.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use ila_beauty_core::UserRole;

use super::AdminNav;
use super::users::UserRow;
use crate::middleware::RequireAdmin;
use crate::routes::notice::{MessageQuery, Notice};
use crate::services::{AdminError, CatalogService, ResellerService};
use crate::state::AppState;

/// Headline numbers.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub customers: usize,
    pub pending_resellers: usize,
    pub approved_resellers: usize,
    pub products: usize,
    pub categories: usize,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin: AdminNav,
    pub notice: Option<Notice>,
    pub stats: DashboardStats,
    pub resellers: Vec<UserRow>,
    pub return_to: &'static str,
}

async fn load(state: &AppState) -> Result<(DashboardStats, Vec<UserRow>), AdminError> {
    let users = ResellerService::new(state.store()).list_users(None).await?;
    let catalog = CatalogService::new(state.store());

    let resellers: Vec<_> = users.iter().filter(|u| u.is_reseller()).collect();
    let stats = DashboardStats {
        customers: users.iter().filter(|u| u.role == UserRole::Customer).count(),
        pending_resellers: resellers.iter().filter(|u| !u.approved).count(),
        approved_resellers: resellers.iter().filter(|u| u.approved).count(),
        products: catalog.list_products().await?.len(),
        categories: catalog.list_categories().await?.len(),
    };

    // Pending first, newest first within each group.
    let mut rows: Vec<UserRow> = resellers.iter().map(|u| UserRow::from(*u)).collect();
    rows.sort_by_key(|row| row.approved);

    Ok((stats, rows))
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> DashboardTemplate {
    let mut notice = query.notice();
    let (stats, resellers) = match load(&state).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dashboard");
            notice = Some(Notice::load_failed());
            (DashboardStats::default(), Vec::new())
        }
    };

    DashboardTemplate {
        admin: AdminNav::new(&admin, "/admin"),
        notice,
        stats,
        resellers,
        return_to: "/admin",
    }
}
