//! Starter catalog.
//!
//! Four categories and four products matching the storefront's launch
//! range. Products reference categories by id, so categories are written
//! first.

use rust_decimal::Decimal;

use ila_beauty_core::{CurrencyCode, Price};
use ila_beauty_storefront::db::KeyValueStore;
use ila_beauty_storefront::models::{CategoryDraft, ProductDraft};
use ila_beauty_storefront::services::CatalogService;

use super::{CommandError, open_store};

const CATEGORIES: &[(&str, &str)] = &[
    ("Cleansers", "Gentle formulas that remove impurities"),
    ("Serums", "Targeted treatments for specific concerns"),
    ("Moisturizers", "Hydration for all skin types"),
    ("Masks", "Intensive treatments for radiant skin"),
];

/// (name, description, whole dollars, category name)
const PRODUCTS: &[(&str, &str, i64, &str)] = &[
    (
        "Hydrating Rose Serum",
        "24-hour moisture formula with rose extract",
        38,
        "Serums",
    ),
    (
        "Brightening Vitamin C Cream",
        "Antioxidant-rich formula for radiant skin",
        42,
        "Moisturizers",
    ),
    (
        "Gentle Exfoliating Toner",
        "BHA & AHA blend for smooth, clear skin",
        32,
        "Cleansers",
    ),
    (
        "Replenishing Night Mask",
        "Overnight repair with peptide complex",
        48,
        "Masks",
    ),
];

/// What a seed run wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
}

/// Seed the configured store with the starter catalog.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or a write fails.
pub async fn catalog(force: bool) -> Result<(), CommandError> {
    let store = open_store("seed catalog").await?;
    let report = seed_catalog(store.as_ref(), force).await?;
    tracing::info!(
        categories = report.categories,
        products = report.products,
        "Seeding complete"
    );
    Ok(())
}

async fn seed_catalog(store: &dyn KeyValueStore, force: bool) -> Result<SeedReport, CommandError> {
    let catalog = CatalogService::new(store);

    if !force && !catalog.list_categories().await?.is_empty() {
        tracing::warn!("Catalog already has categories; pass --force to seed anyway");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = catalog
            .create_category(CategoryDraft {
                name: (*name).to_owned(),
                description: (*description).to_owned(),
                image_url: None,
            })
            .await?;
        category_ids.push((*name, category.id));
        report.categories += 1;
    }

    for (name, description, dollars, category) in PRODUCTS {
        let category_id = category_ids
            .iter()
            .find(|(n, _)| n == category)
            .map(|(_, id)| *id);
        catalog
            .create_product(ProductDraft {
                name: (*name).to_owned(),
                description: (*description).to_owned(),
                price: Price::new(Decimal::from(*dollars), CurrencyCode::USD),
                category_id,
                image_url: None,
            })
            .await?;
        report.products += 1;
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ila_beauty_storefront::db::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_seed_writes_catalog() {
        let store = MemoryStore::new();
        let report = seed_catalog(&store, false).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                categories: 4,
                products: 4
            }
        );

        let listings = CatalogService::new(&store).list_products().await.unwrap();
        let serum = listings
            .iter()
            .find(|l| l.product.name == "Hydrating Rose Serum")
            .unwrap();
        assert_eq!(serum.category_name, "Serums");
        assert_eq!(serum.product.price.to_string(), "$38.00");
    }

    #[tokio::test]
    async fn test_seed_skips_populated_store() {
        let store = MemoryStore::new();
        seed_catalog(&store, false).await.unwrap();

        let second = seed_catalog(&store, false).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(
            CatalogService::new(&store).list_categories().await.unwrap().len(),
            4
        );
    }

    #[tokio::test]
    async fn test_seed_force_adds_again() {
        let store = MemoryStore::new();
        seed_catalog(&store, false).await.unwrap();
        seed_catalog(&store, true).await.unwrap();
        assert_eq!(
            CatalogService::new(&store).list_products().await.unwrap().len(),
            8
        );
    }
}
