//! Product management.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use ila_beauty_core::{CategoryId, CurrencyCode, Price, ProductId};

use super::{AdminNav, non_empty, rejection_code};
use crate::middleware::RequireAdmin;
use crate::models::{Category, ProductDraft};
use crate::routes::notice::{MessageQuery, Notice, with_error, with_success};
use crate::routes::views::SelectOption;
use crate::services::{AdminError, CatalogService, ProductListing};
use crate::state::AppState;

const PRODUCTS_PAGE: &str = "/admin/products";

/// A product row with its edit form values.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_input: String,
    pub price: String,
    pub category_name: String,
    pub image_url: String,
    pub category_options: Vec<SelectOption>,
}

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub admin: AdminNav,
    pub notice: Option<Notice>,
    pub products: Vec<ProductRow>,
    pub new_category_options: Vec<SelectOption>,
}

/// Create/update form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
}

impl ProductForm {
    /// Parse into a draft, or a notice code.
    fn into_draft(self) -> Result<ProductDraft, &'static str> {
        let amount = Decimal::from_str(self.price.trim()).map_err(|_| "invalid_price")?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err("invalid_price");
        }
        let category_id = non_empty(self.category_id)
            .map(|id| CategoryId::from_str(&id))
            .transpose()
            .map_err(|_| "category_not_found")?;

        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            price: Price::new(amount.round_dp(2), CurrencyCode::default()),
            category_id,
            image_url: non_empty(self.image_url),
        })
    }
}

/// Category choices with "None" first.
fn category_options(categories: &[Category], selected: Option<CategoryId>) -> Vec<SelectOption> {
    std::iter::once(SelectOption {
        value: String::new(),
        label: "None".to_owned(),
        selected: selected.is_none(),
    })
    .chain(categories.iter().map(|c| SelectOption {
        value: c.id.to_string(),
        label: c.name.clone(),
        selected: selected == Some(c.id),
    }))
    .collect()
}

fn product_row(listing: ProductListing, categories: &[Category]) -> ProductRow {
    let product = listing.product;
    ProductRow {
        id: product.id.to_string(),
        price_input: product.price.amount.to_string(),
        price: product.price.to_string(),
        category_name: listing.category_name,
        image_url: product.image_url.unwrap_or_default(),
        category_options: category_options(categories, product.category_id),
        name: product.name,
        description: product.description,
    }
}

async fn load(catalog: &CatalogService<'_>) -> Result<(Vec<ProductRow>, Vec<Category>), AdminError> {
    let categories = catalog.list_categories().await?;
    let rows = catalog
        .list_products()
        .await?
        .into_iter()
        .map(|listing| product_row(listing, &categories))
        .collect();
    Ok((rows, categories))
}

/// Products page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> ProductsTemplate {
    let mut notice = query.notice();
    let (products, categories) = match load(&CatalogService::new(state.store())).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products");
            notice = Some(Notice::load_failed());
            (Vec::new(), Vec::new())
        }
    };

    ProductsTemplate {
        admin: AdminNav::new(&admin, PRODUCTS_PAGE),
        notice,
        products,
        new_category_options: category_options(&categories, None),
    }
}

/// Create a product.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(code) => return Redirect::to(&with_error(PRODUCTS_PAGE, code)),
    };

    match CatalogService::new(state.store()).create_product(draft).await {
        Ok(_) => Redirect::to(&with_success(PRODUCTS_PAGE, "product_created")),
        Err(e) => Redirect::to(&with_error(PRODUCTS_PAGE, rejection_code(&e))),
    }
}

/// Update a product.
#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(code) => return Redirect::to(&with_error(PRODUCTS_PAGE, code)),
    };

    match CatalogService::new(state.store())
        .update_product(id, draft)
        .await
    {
        Ok(_) => Redirect::to(&with_success(PRODUCTS_PAGE, "product_updated")),
        Err(e) => Redirect::to(&with_error(PRODUCTS_PAGE, rejection_code(&e))),
    }
}

/// Delete a product.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Redirect {
    match CatalogService::new(state.store()).delete_product(id).await {
        Ok(()) => Redirect::to(&with_success(PRODUCTS_PAGE, "product_deleted")),
        Err(e) => Redirect::to(&with_error(PRODUCTS_PAGE, rejection_code(&e))),
    }
}
