//! Test harness for driving the storefront router in-process.
//!
//! [`TestApp`] builds the full application (routes, session layer and
//! middleware) on the in-memory store. [`TestClient`] sends requests through
//! it with `tower::ServiceExt::oneshot` and carries the session cookie from
//! one response to the next request, like a browser would.
//!
//! ```rust,ignore
//! let app = TestApp::new();
//! let mut client = app.client();
//! let res = client.post_form("/auth/login", &[("email", "a@b.co"), ("password", "...")]).await;
//! assert_eq!(res.location(), Some("/account?success=signed_in"));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use url::Url;

use ila_beauty_storefront::config::StorefrontConfig;
use ila_beauty_storefront::db::{KeyValueStore, MemoryStore};
use ila_beauty_storefront::middleware::create_session_layer;
use ila_beauty_storefront::models::User;
use ila_beauty_storefront::routes;
use ila_beauty_storefront::services::AuthService;
use ila_beauty_storefront::state::AppState;

const SESSION_COOKIE: &str = "ila_session";

/// Password used for every account the harness creates.
pub const PASSWORD: &str = "rosewater-2024";

/// The storefront wired to a fresh in-memory store.
pub struct TestApp {
    router: Router,
    store: Arc<dyn KeyValueStore>,
}

impl TestApp {
    /// Build the application with empty storage.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn new() -> Self {
        let config = StorefrontConfig::in_memory(Url::parse("http://localhost:3000").unwrap());
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = create_session_layer(tower_sessions::MemoryStore::default(), &config);
        let router = routes::app(AppState::new(config, Arc::clone(&store)), sessions);
        Self { router, store }
    }

    /// The backing store, for seeding and assertions.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// A client with no session.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// A client presenting a previously captured `ila_session=<id>` pair.
    #[must_use]
    pub fn client_with_cookie(&self, cookie: &str) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: Some(cookie.to_owned()),
        }
    }

    /// Create an admin account directly in the store.
    ///
    /// # Panics
    ///
    /// Panics if the account cannot be created.
    #[allow(clippy::unwrap_used)]
    pub async fn create_admin(&self, email: &str) -> User {
        AuthService::new(self.store())
            .create_admin(email, PASSWORD)
            .await
            .unwrap()
    }

    /// A client already signed in to the admin console.
    ///
    /// # Panics
    ///
    /// Panics if the admin sign-in does not succeed.
    pub async fn admin_client(&self) -> TestClient {
        self.create_admin("owner@ilabeauty.com").await;
        let mut client = self.client();
        let res = client
            .post_form(
                "/admin-login",
                &[("email", "owner@ilabeauty.com"), ("password", PASSWORD)],
            )
            .await;
        assert_eq!(res.location(), Some("/admin?success=welcome"));
        client
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A browser-like client holding at most one session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    /// Send a urlencoded form POST.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request).await
    }

    /// Whether the client currently holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// The `ila_session=<id>` pair the client would send, if any.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, request: Result<Request<Body>, axum::http::Error>) -> TestResponse {
        let response = self.router.clone().oneshot(request.unwrap()).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default().trim();
            if let Some(id) = pair.strip_prefix(&format!("{SESSION_COOKIE}=")) {
                self.cookie = (!id.is_empty()).then(|| pair.to_owned());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Whether the body contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}
