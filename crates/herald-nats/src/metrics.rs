//! Metrics for bus and delivery observability.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the broadcaster's message path.
#[derive(Debug, Default)]
pub struct BusMetrics {
    /// Total messages received from the bus.
    pub messages_received: AtomicU64,
    /// Total bytes received.
    pub bytes_received: AtomicU64,
    /// Total payloads dropped because they failed to decode.
    pub decode_failures: AtomicU64,
    /// Total notifications delivered.
    pub notifications_sent: AtomicU64,
    /// Total notification delivery failures.
    pub notification_failures: AtomicU64,
    /// Total reconnection attempts.
    pub reconnect_attempts: AtomicU64,
}

impl BusMetrics {
    /// Create a new metrics instance.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a received message.
    pub fn record_receive(&self, bytes: u64) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a dropped, undecodable payload.
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delivered notification.
    pub fn record_notification(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed delivery attempt.
    pub fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reconnection attempt.
    pub fn record_reconnect(&self) {
        self.reconnect_attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            notifications_sent: self.notifications_sent.load(Ordering::Relaxed),
            notification_failures: self.notification_failures.load(Ordering::Relaxed),
            reconnect_attempts: self.reconnect_attempts.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub messages_received: u64,
    pub bytes_received: u64,
    pub decode_failures: u64,
    pub notifications_sent: u64,
    pub notification_failures: u64,
    pub reconnect_attempts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = BusMetrics::new();
        metrics.record_receive(12);
        metrics.record_receive(8);
        metrics.record_decode_failure();
        metrics.record_notification();
        metrics.record_notification_failure();
        metrics.record_reconnect();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.messages_received, 2);
        assert_eq!(snapshot.bytes_received, 20);
        assert_eq!(snapshot.decode_failures, 1);
        assert_eq!(snapshot.notifications_sent, 1);
        assert_eq!(snapshot.notification_failures, 1);
        assert_eq!(snapshot.reconnect_attempts, 1);
    }
}
