//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Delivers one text message to the configured destination.
///
/// Implementations send exactly one request per call and do not retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> crate::Result<()>;
}
