//! Queue-group subscription worker.
//!
//! All broadcaster replicas share one queue-group name, so each published
//! message is delivered to exactly one member. Processing is fire-and-forget
//! relative to the bus: a message counts as handled whether or not decoding
//! or delivery succeeds, and there is no redelivery path.

use std::sync::Arc;

use futures::StreamExt;
use herald_core::{Error, Notifier, Result, TodoEvent, render_notification};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::connection::BusConnection;
use crate::metrics::BusMetrics;

/// Drives the per-message pipeline for one queue-group subscription.
pub struct SubscriptionWorker {
    subscriber: async_nats::Subscriber,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<BusMetrics>,
    inflight: Arc<Semaphore>,
    subject: String,
    queue_group: String,
}

impl SubscriptionWorker {
    /// Register the queue-group subscription.
    ///
    /// Returns once the subscription is registered with the client; callers
    /// must still flush the connection to guarantee the server has seen it
    /// before reporting ready.
    pub async fn subscribe(
        connection: &BusConnection,
        notifier: Arc<dyn Notifier>,
        subject: &str,
        queue_group: &str,
        max_inflight: usize,
    ) -> Result<Self> {
        let subscriber = connection
            .client()
            .queue_subscribe(subject.to_string(), queue_group.to_string())
            .await
            .map_err(|e| Error::Bus(format!("failed to subscribe on {subject}: {e}")))?;

        info!(
            subject,
            queue = queue_group,
            max_inflight,
            "queue subscription registered"
        );

        Ok(Self {
            subscriber,
            notifier,
            metrics: Arc::clone(connection.metrics()),
            inflight: Arc::new(Semaphore::new(max_inflight)),
            subject: subject.to_string(),
            queue_group: queue_group.to_string(),
        })
    }

    /// Drive the message loop until the subscription ends.
    ///
    /// Each message is handled on its own task; the semaphore bounds how many
    /// deliveries are in flight at once, and a burst beyond the bound waits
    /// here instead of spawning unbounded work.
    pub async fn run(mut self) {
        while let Some(message) = self.subscriber.next().await {
            let permit = match Arc::clone(&self.inflight).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let notifier = Arc::clone(&self.notifier);
            let metrics = Arc::clone(&self.metrics);
            tokio::spawn(async move {
                handle_message(&message.payload, notifier.as_ref(), &metrics).await;
                drop(permit);
            });
        }

        info!(
            subject = %self.subject,
            queue = %self.queue_group,
            "subscription stream ended"
        );
    }
}

/// Per-message pipeline: decode, render, deliver, log the outcome.
///
/// Decode failures are logged and dropped without an outbound call; delivery
/// failures are logged and dropped. Neither affects the process.
pub async fn handle_message(payload: &[u8], notifier: &dyn Notifier, metrics: &BusMetrics) {
    metrics.record_receive(payload.len() as u64);

    let event: TodoEvent = match serde_json::from_slice(payload) {
        Ok(event) => event,
        Err(e) => {
            metrics.record_decode_failure();
            warn!(error = %e, "invalid event json, dropping message");
            return;
        }
    };

    let text = render_notification(&event, payload);

    match notifier.notify(&text).await {
        Ok(()) => {
            metrics.record_notification();
            info!(event = event.kind(), "notification sent");
        }
        Err(e) => {
            metrics.record_notification_failure();
            error!(event = event.kind(), error = %e, "failed to send notification");
        }
    }
}
