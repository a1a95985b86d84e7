//! Key-value store on a hosted REST data backend.
//!
//! Talks to the `kv_entry` table through a `PostgREST`-style API
//! (`/rest/v1/kv_entry`). Filters use the `column=op.value` query
//! convention and write semantics are selected with the `Prefer` header.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use super::{KeyValueStore, RepositoryError};

const TABLE_PATH: [&str; 3] = ["rest", "v1", "kv_entry"];

#[derive(Debug, Deserialize)]
struct EntryRow {
    key: String,
    value: Value,
}

#[derive(Debug, Deserialize)]
struct ValueRow {
    value: Value,
}

/// Key-value store backed by a hosted REST API.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct HostedStore {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
}

impl std::fmt::Debug for HostedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedStore")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HostedStore {
    /// Create a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if `base_url` cannot carry a path.
    pub fn new(base_url: &Url, api_key: SecretString) -> Result<Self, RepositoryError> {
        let mut endpoint = base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| RepositoryError::Backend(format!("invalid backend url: {base_url}")))?
            .pop_if_empty()
            .extend(TABLE_PATH);

        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
        })
    }

    fn url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(params);
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        self.client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, RepositoryError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RepositoryError::Backend(format!("{status}: {body}")))
    }
}

#[async_trait]
impl KeyValueStore for HostedStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        let filter = format!("eq.{key}");
        let url = self.url(&[("key", &filter), ("select", "value")]);
        let rows: Vec<ValueRow> = Self::send(self.request(Method::GET, url))
            .await?
            .json()
            .await?;
        Ok(rows.into_iter().next().map(|row| row.value))
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), RepositoryError> {
        let builder = self
            .request(Method::POST, self.endpoint.clone())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&json!([{ "key": key, "value": value }]));
        Self::send(builder).await?;
        Ok(())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<bool, RepositoryError> {
        let builder = self
            .request(Method::POST, self.endpoint.clone())
            .header("Prefer", "resolution=ignore-duplicates,return=representation")
            .json(&json!([{ "key": key, "value": value }]));
        let inserted: Vec<EntryRow> = Self::send(builder).await?.json().await?;
        Ok(!inserted.is_empty())
    }

    async fn remove(&self, key: &str) -> Result<bool, RepositoryError> {
        let filter = format!("eq.{key}");
        let builder = self
            .request(Method::DELETE, self.url(&[("key", &filter)]))
            .header("Prefer", "return=representation");
        let removed: Vec<EntryRow> = Self::send(builder).await?.json().await?;
        Ok(!removed.is_empty())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, Value)>, RepositoryError> {
        let filter = format!("like.{prefix}*");
        let url = self.url(&[
            ("key", &filter),
            ("select", "key,value"),
            ("order", "key.asc"),
        ]);
        let rows: Vec<EntryRow> = Self::send(self.request(Method::GET, url))
            .await?
            .json()
            .await?;

        // LIKE treats `_` as a wildcard, so re-check the literal prefix.
        Ok(rows
            .into_iter()
            .filter(|row| row.key.starts_with(prefix))
            .map(|row| (row.key, row.value))
            .collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let url = self.url(&[("select", "key"), ("limit", "1")]);
        Self::send(self.request(Method::GET, url)).await?;
        Ok(())
    }
}
