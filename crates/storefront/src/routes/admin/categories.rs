//! Category management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use ila_beauty_core::CategoryId;

use super::{AdminNav, non_empty, rejection_code};
use crate::middleware::RequireAdmin;
use crate::models::{Category, CategoryDraft};
use crate::routes::notice::{MessageQuery, Notice, with_error, with_success};
use crate::services::CatalogService;
use crate::state::AppState;

const CATEGORIES_PAGE: &str = "/admin/categories";

/// A category row with its edit form values.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<Category> for CategoryRow {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
            image_url: category.image_url.unwrap_or_default(),
        }
    }
}

/// Categories page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/categories.html")]
pub struct CategoriesTemplate {
    pub admin: AdminNav,
    pub notice: Option<Notice>,
    pub categories: Vec<CategoryRow>,
}

/// Create/update form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

impl From<CategoryForm> for CategoryDraft {
    fn from(form: CategoryForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            image_url: non_empty(form.image_url),
        }
    }
}

/// Categories page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> CategoriesTemplate {
    let mut notice = query.notice();
    let categories = match CatalogService::new(state.store()).list_categories().await {
        Ok(categories) => categories.into_iter().map(CategoryRow::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            notice = Some(Notice::load_failed());
            Vec::new()
        }
    };

    CategoriesTemplate {
        admin: AdminNav::new(&admin, CATEGORIES_PAGE),
        notice,
        categories,
    }
}

/// Create a category.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    match CatalogService::new(state.store())
        .create_category(form.into())
        .await
    {
        Ok(_) => Redirect::to(&with_success(CATEGORIES_PAGE, "category_created")),
        Err(e) => Redirect::to(&with_error(CATEGORIES_PAGE, rejection_code(&e))),
    }
}

/// Update a category.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    match CatalogService::new(state.store())
        .update_category(id, form.into())
        .await
    {
        Ok(_) => Redirect::to(&with_success(CATEGORIES_PAGE, "category_updated")),
        Err(e) => Redirect::to(&with_error(CATEGORIES_PAGE, rejection_code(&e))),
    }
}

/// Delete a category. Products keep their reference.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Redirect {
    match CatalogService::new(state.store()).delete_category(id).await {
        Ok(()) => Redirect::to(&with_success(CATEGORIES_PAGE, "category_deleted")),
        Err(e) => Redirect::to(&with_error(CATEGORIES_PAGE, rejection_code(&e))),
    }
}
