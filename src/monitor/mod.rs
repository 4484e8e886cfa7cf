//! Reconnect supervision around the stream client and router.

mod backoff;
mod supervisor;

pub use backoff::{BackoffStrategy, ReconnectBackoff, DEFAULT_MAX_BACKOFF, DEFAULT_RECONNECT_DELAY};
pub use supervisor::{Monitor, MonitorStats};
