//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page (hero, featured, categories, about, newsletter)
//! GET  /shop              - Full product listing
//! POST /newsletter        - Newsletter sign-up
//! GET  /static/site.css   - Stylesheet
//!
//! # Auth
//! GET  /auth              - Sign-in and registration forms
//! POST /auth/login        - Login action
//! POST /auth/register     - Register action
//! POST /auth/logout       - Logout action
//!
//! # Account (requires auth)
//! GET  /account           - Account overview
//!
//! # Admin
//! GET  /admin-login       - Admin sign-in page
//! POST /admin-login       - Admin sign-in action
//! /admin/...              - Admin console (see `admin`)
//!
//! # Health
//! GET  /health            - Liveness
//! GET  /health/ready      - Readiness (store reachable)
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod home;
pub mod notice;
pub mod views;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::error::AppError;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::auth_page))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(home::shop))
        .route("/newsletter", post(home::subscribe))
        .route("/static/site.css", get(home::stylesheet))
        .nest("/auth", auth_routes())
        .route("/account", get(account::index))
        .route(
            "/admin-login",
            get(admin::login::page).post(admin::login::submit),
        )
        .nest("/admin", admin::routes())
}

/// Build the full application: routes, health checks and the middleware stack.
///
/// Sentry layers are added by the binary so tests can drive this router
/// in-process without a Sentry client.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .fallback(not_found)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
