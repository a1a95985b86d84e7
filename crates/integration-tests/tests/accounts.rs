//! Registration, sign-in and sign-out through the public routes.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use ila_beauty_core::{Email, UserRole};
use ila_beauty_integration_tests::{PASSWORD, TestApp, TestClient};
use ila_beauty_storefront::db::UserRepository;

async fn register(client: &mut TestClient, email: &str, role: &str) -> Option<String> {
    client
        .post_form(
            "/auth/register",
            &[
                ("email", email),
                ("password", PASSWORD),
                ("password_confirm", PASSWORD),
                ("role", role),
            ],
        )
        .await
        .location()
        .map(str::to_owned)
}

async fn login(client: &mut TestClient, email: &str, password: &str) -> Option<String> {
    client
        .post_form("/auth/login", &[("email", email), ("password", password)])
        .await
        .location()
        .map(str::to_owned)
}

#[tokio::test]
async fn customer_registration_signs_in() {
    let app = TestApp::new();
    let mut client = app.client();

    let location = register(&mut client, "jane@example.com", "customer").await;
    assert_eq!(location.as_deref(), Some("/account?success=registered"));

    let account = client.get("/account").await;
    assert_eq!(account.status, StatusCode::OK);
    assert!(account.contains("jane@example.com"));
    assert!(account.contains("customer"));
}

#[tokio::test]
async fn reseller_registration_waits_for_approval() {
    let app = TestApp::new();
    let mut client = app.client();

    let location = register(&mut client, "shop@example.com", "reseller").await;
    assert_eq!(location.as_deref(), Some("/auth?success=pending_approval"));

    // Not signed in
    let account = client.get("/account").await;
    assert_eq!(account.location(), Some("/auth"));

    let stored = UserRepository::new(app.store())
        .get_by_email(&Email::parse("shop@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role, UserRole::Reseller);
    assert!(!stored.approved);
    assert_eq!(stored.stage_label(), Some("Brown"));

    let location = login(&mut client, "shop@example.com", PASSWORD).await;
    assert_eq!(location.as_deref(), Some("/auth?error=pending_approval"));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new();
    let mut first = app.client();
    register(&mut first, "jane@example.com", "customer").await;

    let mut second = app.client();
    let location = register(&mut second, "JANE@example.com", "reseller").await;
    assert_eq!(
        location.as_deref(),
        Some("/auth?tab=register&error=email_taken")
    );

    let users = UserRepository::new(app.store()).list(None).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, UserRole::Customer);
}

#[tokio::test]
async fn registration_form_errors() {
    let app = TestApp::new();
    let mut client = app.client();

    let res = client
        .post_form(
            "/auth/register",
            &[
                ("email", "jane@example.com"),
                ("password", PASSWORD),
                ("password_confirm", "something-else"),
                ("role", "customer"),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/auth?tab=register&error=password_mismatch")
    );

    let location = register(&mut client, "boss@example.com", "admin").await;
    assert_eq!(location.as_deref(), Some("/auth?tab=register&error=role"));

    let location = register(&mut client, "not-an-email", "customer").await;
    assert_eq!(
        location.as_deref(),
        Some("/auth?tab=register&error=invalid_email")
    );

    let res = client
        .post_form(
            "/auth/register",
            &[
                ("email", "jane@example.com"),
                ("password", "short"),
                ("password_confirm", "short"),
                ("role", "customer"),
            ],
        )
        .await;
    assert_eq!(
        res.location(),
        Some("/auth?tab=register&error=password_too_short")
    );

    assert!(UserRepository::new(app.store()).list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn login_failures_are_distinguished() {
    let app = TestApp::new();
    register(&mut app.client(), "jane@example.com", "customer").await;

    let mut client = app.client();
    let location = login(&mut client, "nobody@example.com", PASSWORD).await;
    assert_eq!(location.as_deref(), Some("/auth?error=user_not_found"));

    let location = login(&mut client, "jane@example.com", "wrong-password").await;
    assert_eq!(location.as_deref(), Some("/auth?error=credentials"));

    assert_eq!(client.get("/account").await.location(), Some("/auth"));

    let location = login(&mut client, "jane@example.com", PASSWORD).await;
    assert_eq!(location.as_deref(), Some("/account?success=signed_in"));
    assert_eq!(client.get("/account").await.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new();
    let mut client = app.client();
    register(&mut client, "jane@example.com", "customer").await;
    assert_eq!(client.get("/account").await.status, StatusCode::OK);

    let res = client.post_form("/auth/logout", &[]).await;
    assert_eq!(res.location(), Some("/?success=signed_out"));

    assert_eq!(client.get("/account").await.location(), Some("/auth"));
    assert!(!client.has_session());
}

#[tokio::test]
async fn login_issues_a_fresh_session_cookie() {
    let app = TestApp::new();
    register(&mut app.client(), "sam@example.com", "customer").await;

    let mut client = app.client();
    register(&mut client, "jane@example.com", "customer").await;
    let before = client.session_cookie().unwrap().to_owned();

    login(&mut client, "sam@example.com", PASSWORD).await;
    assert_ne!(client.session_cookie(), Some(before.as_str()));
    assert!(client.get("/account").await.contains("sam@example.com"));

    let mut replay = app.client_with_cookie(&before);
    assert_eq!(replay.get("/account").await.location(), Some("/auth"));
}

#[tokio::test]
async fn signed_in_visitors_skip_the_auth_page() {
    let app = TestApp::new();
    let mut client = app.client();

    let page = client.get("/auth").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("action=\"/auth/login\""));

    let register_tab = client.get("/auth?tab=register").await;
    assert!(register_tab.contains("action=\"/auth/register\""));

    register(&mut client, "jane@example.com", "customer").await;
    assert_eq!(client.get("/auth").await.location(), Some("/account"));
}

#[tokio::test]
async fn notices_render_from_query_codes() {
    let app = TestApp::new();
    let mut client = app.client();

    let page = client.get("/auth?error=credentials").await;
    assert!(page.contains("notice notice-error"));

    let page = client.get("/auth?error=%3Cscript%3E").await;
    assert!(page.contains("Something went wrong"));
    assert!(!page.contains("<script>"));

    let page = client.get("/auth?success=signed_out").await;
    assert!(page.contains("notice notice-success"));
}
