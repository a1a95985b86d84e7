//! Catalog management and the public pages that show it.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use ila_beauty_integration_tests::{TestApp, TestClient};
use ila_beauty_storefront::services::CatalogService;

async fn create_category(admin: &mut TestClient, name: &str) {
    let res = admin
        .post_form(
            "/admin/categories",
            &[("name", name), ("description", "Daily essentials")],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/categories?success=category_created")
    );
}

async fn create_product(admin: &mut TestClient, name: &str, price: &str, category_id: &str) {
    let res = admin
        .post_form(
            "/admin/products",
            &[
                ("name", name),
                ("description", "Glow in a bottle"),
                ("price", price),
                ("category_id", category_id),
                ("image_url", ""),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/products?success=product_created")
    );
}

#[tokio::test]
async fn created_products_appear_in_the_shop() {
    let app = TestApp::new();
    let mut admin = app.admin_client().await;
    create_category(&mut admin, "Serums").await;
    let category = CatalogService::new(app.store())
        .list_categories()
        .await
        .unwrap()
        .remove(0);

    create_product(
        &mut admin,
        "Hydrating Rose Serum",
        "38",
        &category.id.to_string(),
    )
    .await;

    let shop = app.client().get("/shop").await;
    assert_eq!(shop.status, StatusCode::OK);
    assert!(shop.contains("Hydrating Rose Serum"));
    assert!(shop.contains("$38.00"));
    assert!(shop.contains("Serums"));

    let home = app.client().get("/").await;
    assert!(home.contains("Hydrating Rose Serum"));
    assert!(home.contains("Shop By Category"));
}

#[tokio::test]
async fn invalid_product_input_is_rejected() {
    let app = TestApp::new();
    let mut admin = app.admin_client().await;

    let res = admin
        .post_form(
            "/admin/products",
            &[("name", "Serum"), ("price", "-4"), ("category_id", "")],
        )
        .await;
    assert_eq!(res.location(), Some("/admin/products?error=invalid_price"));

    let res = admin
        .post_form(
            "/admin/products",
            &[
                ("name", "Serum"),
                ("price", "12"),
                ("category_id", "00000000-0000-0000-0000-000000000000"),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/products?error=category_not_found")
    );

    let res = admin
        .post_form("/admin/products", &[("name", "  "), ("price", "12")])
        .await;
    assert_eq!(res.location(), Some("/admin/products?error=invalid"));

    assert!(
        CatalogService::new(app.store())
            .list_products()
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn product_update_and_delete() {
    let app = TestApp::new();
    let mut admin = app.admin_client().await;
    create_product(&mut admin, "Night Mask", "48", "").await;
    let product = CatalogService::new(app.store())
        .list_products()
        .await
        .unwrap()
        .remove(0)
        .product;

    let res = admin
        .post_form(
            &format!("/admin/products/{}", product.id),
            &[
                ("name", "Replenishing Night Mask"),
                ("description", "Overnight repair"),
                ("price", "45.5"),
                ("category_id", ""),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/products?success=product_updated")
    );
    let shop = app.client().get("/shop").await;
    assert!(shop.contains("Replenishing Night Mask"));
    assert!(shop.contains("$45.50"));

    let res = admin
        .post_form(&format!("/admin/products/{}/delete", product.id), &[])
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/products?success=product_deleted")
    );
    assert!(!app.client().get("/shop").await.contains("Night Mask"));

    let res = admin
        .post_form(&format!("/admin/products/{}/delete", product.id), &[])
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/products?error=product_not_found")
    );
}

#[tokio::test]
async fn deleting_a_category_keeps_its_products() {
    let app = TestApp::new();
    let mut admin = app.admin_client().await;
    create_category(&mut admin, "Masks").await;
    let category = CatalogService::new(app.store())
        .list_categories()
        .await
        .unwrap()
        .remove(0);
    create_product(&mut admin, "Clay Mask", "20", &category.id.to_string()).await;

    let res = admin
        .post_form(&format!("/admin/categories/{}/delete", category.id), &[])
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/categories?success=category_deleted")
    );

    let listings = CatalogService::new(app.store())
        .list_products()
        .await
        .unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].product.category_id, Some(category.id));
    assert_eq!(listings[0].category_name, "Uncategorized");

    let shop = app.client().get("/shop").await;
    assert!(shop.contains("Clay Mask"));
    assert!(shop.contains("Uncategorized"));
}

#[tokio::test]
async fn category_update() {
    let app = TestApp::new();
    let mut admin = app.admin_client().await;
    create_category(&mut admin, "Cleansers").await;
    let category = CatalogService::new(app.store())
        .list_categories()
        .await
        .unwrap()
        .remove(0);

    let res = admin
        .post_form(
            &format!("/admin/categories/{}", category.id),
            &[
                ("name", "Cleansers & Toners"),
                ("description", "Start here"),
                ("image_url", "https://cdn.example.com/cleansers.jpg"),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/admin/categories?success=category_updated")
    );

    let updated = CatalogService::new(app.store())
        .get_category(category.id)
        .await
        .unwrap();
    assert_eq!(updated.name, "Cleansers & Toners");
    assert_eq!(
        updated.image_url.as_deref(),
        Some("https://cdn.example.com/cleansers.jpg")
    );
    assert_eq!(updated.created_at, category.created_at);

    let page = admin.get("/admin/categories").await;
    assert!(page.contains("Cleansers &amp; Toners") || page.contains("Cleansers &#38; Toners"));
}

#[tokio::test]
async fn empty_store_pages_still_render() {
    let app = TestApp::new();
    let mut client = app.client();

    let home = client.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.contains("Discover Your Natural Beauty Glow"));
    assert!(home.contains("Subscribe to Our Newsletter"));

    let shop = client.get("/shop").await;
    assert_eq!(shop.status, StatusCode::OK);
    assert!(shop.contains("No products yet."));
}

#[tokio::test]
async fn newsletter_signup() {
    let app = TestApp::new();
    let mut client = app.client();

    let res = client
        .post_form("/newsletter", &[("email", "fan@example.com")])
        .await;
    assert_eq!(res.location(), Some("/?success=subscribed#newsletter"));

    let res = client
        .post_form("/newsletter", &[("email", "fan@example.com")])
        .await;
    assert_eq!(res.location(), Some("/?success=subscribed#newsletter"));

    let res = client.post_form("/newsletter", &[("email", "nope")]).await;
    assert_eq!(res.location(), Some("/?error=invalid_email#newsletter"));
}

#[tokio::test]
async fn health_and_assets() {
    let app = TestApp::new();
    let mut client = app.client();

    assert_eq!(client.get("/health").await.status, StatusCode::OK);
    assert_eq!(client.get("/health/ready").await.status, StatusCode::OK);

    let css = client.get("/static/site.css").await;
    assert_eq!(css.status, StatusCode::OK);
    assert!(css.contains(".notice-error"));
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let app = TestApp::new();
    let res = app.client().get("/cart").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "Page not found");
}
