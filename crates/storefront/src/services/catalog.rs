//! Catalog management and storefront listings.
//!
//! Category deletion never touches products. A product whose category is
//! missing or deleted is listed under [`UNCATEGORIZED`].

use std::collections::HashMap;

use ila_beauty_core::{CategoryId, ProductId};

use super::AdminError;
use crate::db::{CategoryRepository, KeyValueStore, ProductRepository};
use crate::models::{Category, CategoryDraft, Product, ProductDraft, UNCATEGORIZED};

/// A product with its category name resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub product: Product,
    pub category_name: String,
}

/// Product and category operations.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
    categories: CategoryRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            products: ProductRepository::new(store),
            categories: CategoryRepository::new(store),
        }
    }

    /// All products with category names, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the catalog cannot be loaded.
    pub async fn list_products(&self) -> Result<Vec<ProductListing>, AdminError> {
        let names: HashMap<CategoryId, String> = self
            .categories
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let listings = self
            .products
            .list()
            .await?
            .into_iter()
            .map(|product| {
                let category_name = product
                    .category_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| UNCATEGORIZED.to_owned());
                ProductListing {
                    product,
                    category_name,
                }
            })
            .collect();

        Ok(listings)
    }

    /// The newest `limit` products for the home page.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the catalog cannot be loaded.
    pub async fn featured(&self, limit: usize) -> Result<Vec<ProductListing>, AdminError> {
        let mut listings = self.list_products().await?;
        listings.reverse();
        listings.truncate(limit);
        Ok(listings)
    }

    /// Get one product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ProductNotFound` if it does not exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, AdminError> {
        self.products
            .get(id)
            .await?
            .ok_or(AdminError::ProductNotFound)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty name or negative price,
    /// `AdminError::CategoryNotFound` for an unknown category.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, AdminError> {
        let draft = self.validate_product(draft).await?;
        let product = Product::new(draft);
        self.products.put(&product).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Overwrite a product's editable fields.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_product`], plus `AdminError::ProductNotFound`.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, AdminError> {
        let mut product = self.get_product(id).await?;
        let draft = self.validate_product(draft).await?;
        product.apply(draft);
        self.products.put(&product).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ProductNotFound` if it does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminError> {
        if !self.products.delete(id).await? {
            return Err(AdminError::ProductNotFound);
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn validate_product(&self, mut draft: ProductDraft) -> Result<ProductDraft, AdminError> {
        draft.name = required_name(&draft.name)?;
        draft.description = draft.description.trim().to_owned();
        draft.image_url = optional_url(draft.image_url);
        if draft.price.is_negative() {
            return Err(AdminError::Validation("price cannot be negative".to_owned()));
        }
        if let Some(category_id) = draft.category_id
            && self.categories.get(category_id).await?.is_none()
        {
            return Err(AdminError::CategoryNotFound);
        }
        Ok(draft)
    }

    /// All categories, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the categories cannot be loaded.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AdminError> {
        Ok(self.categories.list().await?)
    }

    /// Get one category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::CategoryNotFound` if it does not exist.
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, AdminError> {
        self.categories
            .get(id)
            .await?
            .ok_or(AdminError::CategoryNotFound)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty name.
    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, AdminError> {
        let category = Category::new(validate_category(draft)?);
        self.categories.put(&category).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Overwrite a category's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::CategoryNotFound` or `AdminError::Validation`.
    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, AdminError> {
        let mut category = self.get_category(id).await?;
        category.apply(validate_category(draft)?);
        self.categories.put(&category).await?;
        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Delete a category. Its products keep the dangling reference.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::CategoryNotFound` if it does not exist.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), AdminError> {
        if !self.categories.delete(id).await? {
            return Err(AdminError::CategoryNotFound);
        }
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

fn validate_category(mut draft: CategoryDraft) -> Result<CategoryDraft, AdminError> {
    draft.name = required_name(&draft.name)?;
    draft.description = draft.description.trim().to_owned();
    draft.image_url = optional_url(draft.image_url);
    Ok(draft)
}

fn required_name(name: &str) -> Result<String, AdminError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::Validation("name is required".to_owned()));
    }
    Ok(name.to_owned())
}

fn optional_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ila_beauty_core::Price;

    use super::*;
    use crate::db::MemoryStore;

    fn category_draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_owned(),
            description: String::new(),
            image_url: None,
        }
    }

    fn product_draft(name: &str, cents: i64, category_id: Option<CategoryId>) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            description: "  Lightweight and fresh.  ".to_owned(),
            price: Price::usd_cents(cents),
            category_id,
            image_url: Some("   ".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_create_product_normalizes_fields() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let serums = catalog.create_category(category_draft("Serums")).await.unwrap();

        let product = catalog
            .create_product(product_draft("  Hydrating Rose Serum ", 3800, Some(serums.id)))
            .await
            .unwrap();
        assert_eq!(product.name, "Hydrating Rose Serum");
        assert_eq!(product.description, "Lightweight and fresh.");
        assert_eq!(product.image_url, None);

        let listings = catalog.list_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category_name, "Serums");
    }

    #[tokio::test]
    async fn test_product_validation() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let blank = catalog.create_product(product_draft("   ", 100, None)).await;
        assert!(matches!(blank, Err(AdminError::Validation(_))));

        let negative = catalog.create_product(product_draft("Toner", -1, None)).await;
        assert!(matches!(negative, Err(AdminError::Validation(_))));

        let dangling = catalog
            .create_product(product_draft("Toner", 3200, Some(CategoryId::generate())))
            .await;
        assert!(matches!(dangling, Err(AdminError::CategoryNotFound)));

        let free = catalog.create_product(product_draft("Sample", 0, None)).await;
        assert!(free.is_ok());
    }

    #[tokio::test]
    async fn test_delete_product_removes_from_listing() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let keep = catalog
            .create_product(product_draft("Cream", 4200, None))
            .await
            .unwrap();
        let gone = catalog
            .create_product(product_draft("Mask", 4800, None))
            .await
            .unwrap();

        catalog.delete_product(gone.id).await.unwrap();
        let listings = catalog.list_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].product.id, keep.id);

        assert!(matches!(
            catalog.delete_product(gone.id).await,
            Err(AdminError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_category_does_not_cascade() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let masks = catalog.create_category(category_draft("Masks")).await.unwrap();
        let product = catalog
            .create_product(product_draft("Night Mask", 4800, Some(masks.id)))
            .await
            .unwrap();

        catalog.delete_category(masks.id).await.unwrap();

        let listings = catalog.list_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].product.category_id, Some(masks.id));
        assert_eq!(listings[0].category_name, UNCATEGORIZED);
        assert_eq!(catalog.get_product(product.id).await.unwrap().id, product.id);
    }

    #[tokio::test]
    async fn test_update_product_keeps_identity() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let original = catalog
            .create_product(product_draft("Toner", 3200, None))
            .await
            .unwrap();

        let updated = catalog
            .update_product(original.id, product_draft("Gentle Toner", 3000, None))
            .await
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.price, Price::usd_cents(3000));

        let missing = catalog
            .update_product(ProductId::generate(), product_draft("X", 1, None))
            .await;
        assert!(matches!(missing, Err(AdminError::ProductNotFound)));
    }

    #[tokio::test]
    async fn test_update_category() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let category = catalog.create_category(category_draft("Serum")).await.unwrap();

        let renamed = catalog
            .update_category(category.id, category_draft("Serums"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Serums");
        assert_eq!(catalog.list_categories().await.unwrap(), vec![renamed]);

        let blank = catalog
            .update_category(category.id, category_draft(""))
            .await;
        assert!(matches!(blank, Err(AdminError::Validation(_))));
    }

    #[tokio::test]
    async fn test_featured_takes_newest() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        for name in ["One", "Two", "Three"] {
            catalog
                .create_product(product_draft(name, 1000, None))
                .await
                .unwrap();
            // created_at ordering needs distinct timestamps
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let featured = catalog.featured(2).await.unwrap();
        let names: Vec<_> = featured.iter().map(|l| l.product.name.as_str()).collect();
        assert_eq!(names, ["Three", "Two"]);
    }
}
