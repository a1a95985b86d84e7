//! Storefront pages: home, shop, newsletter sign-up.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use super::notice::{MessageQuery, Notice, with_error, with_success};
use super::views::{CategoryView, Nav, ProductView};
use crate::content::{self, About, Hero, Newsletter};
use crate::middleware::OptionalAuth;
use crate::services::{CatalogService, newsletter};
use crate::state::AppState;

const STYLESHEET: &str = include_str!("../../static/site.css");

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub notice: Option<Notice>,
    pub hero: Hero,
    pub featured: Vec<ProductView>,
    pub categories: Vec<CategoryView>,
    pub about: About,
    pub newsletter: Newsletter,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub nav: Nav,
    pub notice: Option<Notice>,
    pub products: Vec<ProductView>,
}

/// Newsletter form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Display the home page.
///
/// A store failure degrades to empty sections plus a notice.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> HomeTemplate {
    let catalog = CatalogService::new(state.store());
    let mut notice = query.notice();

    let featured = match catalog.featured(state.config().featured_limit).await {
        Ok(listings) => listings.into_iter().map(ProductView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load featured products");
            notice = Some(Notice::load_failed());
            Vec::new()
        }
    };
    let categories = match catalog.list_categories().await {
        Ok(categories) => categories.into_iter().map(CategoryView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            notice = Some(Notice::load_failed());
            Vec::new()
        }
    };

    HomeTemplate {
        nav: Nav::new(user.as_ref()),
        notice,
        hero: content::HERO,
        featured,
        categories,
        about: content::ABOUT,
        newsletter: content::NEWSLETTER,
    }
}

/// Display every product.
#[instrument(skip_all)]
pub async fn shop(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> ShopTemplate {
    let mut notice = query.notice();
    let products = match CatalogService::new(state.store()).list_products().await {
        Ok(listings) => listings.into_iter().map(ProductView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products");
            notice = Some(Notice::load_failed());
            Vec::new()
        }
    };

    ShopTemplate {
        nav: Nav::new(user.as_ref()),
        notice,
        products,
    }
}

/// Handle the newsletter form.
#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> Redirect {
    match newsletter::subscribe(state.store(), &form.email).await {
        Ok(_) => Redirect::to(&format!("{}#newsletter", with_success("/", "subscribed"))),
        Err(newsletter::NewsletterError::InvalidEmail(_)) => {
            Redirect::to(&format!("{}#newsletter", with_error("/", "invalid_email")))
        }
        Err(e) => {
            tracing::error!(error = %e, "Newsletter subscription failed");
            Redirect::to(&format!("{}#newsletter", with_error("/", "failed")))
        }
    }
}

/// Serve the site stylesheet.
pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}
