//! Delay policy between reconnect attempts.

use serde::Deserialize;
use std::time::Duration;

/// Default pause before reconnecting.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Default cap for exponential backoff.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// Same delay every time
    #[default]
    Fixed,
    /// Doubling delay, capped, reset after a successful connect
    Exponential,
}

/// Tracks consecutive reconnects and hands out the next delay.
#[derive(Debug, Clone)]
pub struct ReconnectBackoff {
    strategy: BackoffStrategy,
    /// Base delay (first retry)
    base_delay: Duration,
    /// Delay the next retry will use
    current_delay: Duration,
    /// Maximum delay cap
    max_delay: Duration,
    /// Number of consecutive retries since the last reset
    failure_count: u32,
}

impl ReconnectBackoff {
    pub fn fixed(delay: Duration) -> Self {
        Self::with_strategy(BackoffStrategy::Fixed, delay, delay)
    }

    pub fn exponential(base_delay: Duration, max_delay: Duration) -> Self {
        Self::with_strategy(BackoffStrategy::Exponential, base_delay, max_delay)
    }

    pub fn with_strategy(strategy: BackoffStrategy, base_delay: Duration, max_delay: Duration) -> Self {
        let max_delay = max_delay.max(base_delay);
        Self {
            strategy,
            base_delay,
            current_delay: base_delay,
            max_delay,
            failure_count: 0,
        }
    }

    /// Record a retry and return how long to wait before it.
    pub fn next_delay(&mut self) -> Duration {
        self.failure_count = self.failure_count.saturating_add(1);
        let delay = self.current_delay;
        if self.strategy == BackoffStrategy::Exponential {
            // Double the delay, up to max
            self.current_delay = self.current_delay.saturating_mul(2).min(self.max_delay);
        }
        delay
    }

    /// Back to the base delay after a connection succeeded.
    pub fn reset(&mut self) {
        if self.failure_count > 1 && self.strategy == BackoffStrategy::Exponential {
            tracing::debug!("Connected after {} retries, resetting backoff", self.failure_count);
        }
        self.failure_count = 0;
        self.current_delay = self.base_delay;
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    pub fn strategy(&self) -> BackoffStrategy {
        self.strategy
    }
}

impl Default for ReconnectBackoff {
    fn default() -> Self {
        Self::fixed(DEFAULT_RECONNECT_DELAY)
    }
}
