//! Supervisory loop: connect, drain, reconnect, until cancelled.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::backoff::ReconnectBackoff;
use crate::error::StreamError;
use crate::router::{EventRouter, RouteSummary};
use crate::stream::{StreamClient, StreamItem};

/// Counters accumulated over the life of a [`Monitor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Handshakes attempted
    pub connect_attempts: usize,
    /// Handshakes that succeeded
    pub connections: usize,
    /// Batches decoded and routed
    pub batches: usize,
    /// Payloads that failed to decode
    pub malformed: usize,
    /// Router totals across every batch
    pub routed: RouteSummary,
}

/// Owns the stream connection and the router and keeps them running.
pub struct Monitor {
    stream: StreamClient,
    router: EventRouter,
    backoff: ReconnectBackoff,
    stats: MonitorStats,
}

impl Monitor {
    pub fn new(stream: StreamClient, router: EventRouter, backoff: ReconnectBackoff) -> Self {
        Self {
            stream,
            router,
            backoff,
            stats: MonitorStats::default(),
        }
    }

    pub fn stream(&self) -> &StreamClient {
        &self.stream
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Run until `cancel` fires.
    ///
    /// Connect failures, lost connections and clean closes all lead to a
    /// reconnect after the backoff delay. The connection is released before
    /// this returns.
    pub async fn run(&mut self, cancel: &CancellationToken) -> MonitorStats {
        info!("Watching {}", self.stream.endpoint());

        loop {
            match self.run_session(cancel).await {
                Ok(()) => info!("Change stream ended"),
                Err(err) if err.should_reconnect() => {
                    warn!("[{}] {}", err.error_code(), err.user_message());
                    debug!("{}", err);
                }
                Err(_) => break,
            }

            let delay = self.backoff.next_delay();
            info!("Reconnecting in {}s…", delay.as_secs_f32());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("Monitoring canceled. Cleaning up...");
        self.stream.shutdown();
        info!("Quitting…");
        self.stats
    }

    /// One connection, drained until it ends.
    async fn run_session(&mut self, cancel: &CancellationToken) -> Result<(), StreamError> {
        self.stats.connect_attempts += 1;
        self.stream.connect(cancel).await?;
        self.stats.connections += 1;
        self.backoff.reset();

        loop {
            match self.stream.next_item(cancel).await? {
                StreamItem::EndOfStream => return Ok(()),
                StreamItem::Malformed(err) => {
                    self.stats.malformed += 1;
                    warn!("Non-JSON event received: {} ({})", err.payload, err.message);
                }
                StreamItem::Batch(batch) => {
                    self.stats.batches += 1;
                    let summary = self.router.route(&batch, cancel).await?;
                    debug!(
                        "Batch of {} events: {} delivered, {} degraded, {} failed",
                        summary.considered, summary.delivered, summary.degraded, summary.failed
                    );
                    self.stats.routed.merge(summary);
                }
            }
        }
    }
}
