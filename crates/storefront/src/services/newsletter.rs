//! Newsletter sign-up.

use thiserror::Error;

use ila_beauty_core::{Email, EmailError};

use crate::db::{KeyValueStore, RepositoryError, SubscriberRepository};

/// Errors from newsletter sign-up.
#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Subscribe `email` to the newsletter. Subscribing twice succeeds.
///
/// # Errors
///
/// Returns `NewsletterError::InvalidEmail` for a malformed address.
pub async fn subscribe(store: &dyn KeyValueStore, email: &str) -> Result<Email, NewsletterError> {
    let email = Email::parse(email)?;
    let new = SubscriberRepository::new(store).subscribe(&email).await?;
    if new {
        tracing::info!("Newsletter subscription recorded");
    } else {
        tracing::debug!("Newsletter address already subscribed");
    }
    Ok(email)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::db::MemoryStore;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let store = MemoryStore::new();
        subscribe(&store, "jane@example.com").await.unwrap();
        subscribe(&store, "Jane@Example.com").await.unwrap();
        assert_eq!(SubscriberRepository::new(&store).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_rejects_bad_email() {
        let store = MemoryStore::new();
        let result = subscribe(&store, "jane.example.com").await;
        assert!(matches!(result, Err(NewsletterError::InvalidEmail(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_subscribe_keeps_address_out_of_logs() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = MemoryStore::new();
        subscribe(&store, "jane@example.com").await.unwrap();
        subscribe(&store, "jane@example.com").await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Newsletter subscription recorded"));
        assert!(!output.contains("jane@example.com"));
    }
}
