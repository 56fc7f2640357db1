//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and external
//! adapters.

use crate::Result;
use async_trait::async_trait;

/// Outbound notification channel.
///
/// Implementations must be safe for concurrent invocation: the subscription
/// worker delivers in-flight messages in parallel against a single shared
/// instance.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one human-readable notification.
    async fn notify(&self, text: &str) -> Result<()>;
}
