//! Product and category repositories.
//!
//! Both collections support read-all, get, overwrite-by-id and
//! delete-by-id. Writes are unconditional overwrites.

use ila_beauty_core::{CategoryId, ProductId};

use super::{KeyValueStore, RepositoryError, load, load_all, save};
use crate::models::{Category, Product};

const PRODUCT_PREFIX: &str = "products/";
const CATEGORY_PREFIX: &str = "categories/";

fn product_key(id: ProductId) -> String {
    format!("{PRODUCT_PREFIX}{id}")
}

fn category_key(id: CategoryId) -> String {
    format!("{CATEGORY_PREFIX}{id}")
}

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if any document is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products: Vec<Product> = load_all(self.store, PRODUCT_PREFIX).await?;
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the read fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        load(self.store, &product_key(id)).await
    }

    /// Insert or overwrite a product.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub async fn put(&self, product: &Product) -> Result<(), RepositoryError> {
        save(self.store, &product_key(product.id), product).await
    }

    /// Delete a product. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        self.store.remove(&product_key(id)).await
    }
}

/// Repository for catalog categories.
pub struct CategoryRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All categories, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if any document is invalid.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut categories: Vec<Category> = load_all(self.store, CATEGORY_PREFIX).await?;
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the read fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        load(self.store, &category_key(id)).await
    }

    /// Insert or overwrite a category.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub async fn put(&self, category: &Category) -> Result<(), RepositoryError> {
        save(self.store, &category_key(category.id), category).await
    }

    /// Delete a category. Products referencing it are left as they are.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the delete fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        self.store.remove(&category_key(id)).await
    }
}
