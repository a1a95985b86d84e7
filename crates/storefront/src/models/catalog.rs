//! Catalog domain types managed from the admin console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ila_beauty_core::{CategoryId, Price, ProductId};

/// Label shown for products without a resolvable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A product listed in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Category reference. May dangle after the category is deleted.
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product from validated input.
    #[must_use]
    pub fn new(draft: ProductDraft) -> Self {
        Self {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category_id: draft.category_id,
            image_url: draft.image_url,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the editable fields, keeping id and creation time.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.category_id = draft.category_id;
        self.image_url = draft.image_url;
    }
}

/// Editable product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a category from validated input.
    #[must_use]
    pub fn new(draft: CategoryDraft) -> Self {
        Self {
            id: CategoryId::generate(),
            name: draft.name,
            description: draft.description,
            image_url: draft.image_url,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the editable fields, keeping id and creation time.
    pub fn apply(&mut self, draft: CategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.image_url = draft.image_url;
    }
}

/// Editable category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}
