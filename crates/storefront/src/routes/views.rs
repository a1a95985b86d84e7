//! Display data shared by page templates.

use crate::models::{Category, CurrentUser};
use crate::services::ProductListing;

/// Header navigation state.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub email: Option<String>,
    pub is_admin: bool,
}

impl Nav {
    #[must_use]
    pub fn new(user: Option<&CurrentUser>) -> Self {
        user.map_or_else(Self::default, |user| Self {
            email: Some(user.email.to_string()),
            is_admin: user.is_admin(),
        })
    }

    #[must_use]
    pub const fn signed_in(&self) -> bool {
        self.email.is_some()
    }
}

/// Product card data.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<ProductListing> for ProductView {
    fn from(listing: ProductListing) -> Self {
        let product = listing.product;
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            category: listing.category_name,
            image_url: product.image_url,
        }
    }
}

/// Category card data.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
            image_url: category.image_url,
        }
    }
}

/// One `<option>` in a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}
