//! Newsletter subscriber list.

use chrono::Utc;
use serde_json::json;

use ila_beauty_core::Email;

use super::{KeyValueStore, RepositoryError};

const SUBSCRIBER_PREFIX: &str = "newsletter/";

/// Repository for newsletter subscriptions, keyed by normalized email.
pub struct SubscriberRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Record a subscription. Returns `false` if the email was already subscribed.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub async fn subscribe(&self, email: &Email) -> Result<bool, RepositoryError> {
        let key = format!("{SUBSCRIBER_PREFIX}{}", email.normalized());
        self.store
            .insert(&key, json!({ "subscribedAt": Utc::now() }))
            .await
    }

    /// Number of subscribers.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the scan fails.
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.scan(SUBSCRIBER_PREFIX).await?.len())
    }
}
