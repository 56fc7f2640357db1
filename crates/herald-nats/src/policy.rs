//! Reconnect delay policy.
//!
//! The delay for attempt `n` is `first × factor^n`, clamped to `max`. The
//! default is a fixed one-second interval; exponential growth is available
//! through the same interface.

use std::time::Duration;

use herald_core::config::RECONNECT_WAIT;

/// Delay policy for reconnection attempts.
#[derive(Clone, Copy, Debug)]
pub struct ReconnectPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`1.0` keeps the delay constant).
    pub factor: f64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(RECONNECT_WAIT)
    }
}

impl ReconnectPolicy {
    /// Constant delay between attempts.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            first: interval,
            max: interval,
            factor: 1.0,
        }
    }

    /// Exponentially growing delay, capped at `max`.
    pub fn exponential(first: Duration, max: Duration, factor: f64) -> Self {
        Self { first, max, factor }
    }

    /// Computes the delay for the given attempt number (0-indexed).
    pub fn next(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let unclamped = self.first.as_secs_f64() * self.factor.powi(attempt.min(i32::MAX as u32) as i32);

        if !unclamped.is_finite() || unclamped < 0.0 || unclamped > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(unclamped)
        }
    }
}
