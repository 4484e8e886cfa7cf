//! Recording notification sink for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::models::NotificationPayload;
use crate::traits::{NotificationSink, SinkError};

/// Sink that keeps every payload it receives.
///
/// Can be told to reject deliveries, or to stall forever so tests can
/// cancel a delivery in flight.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<Mutex<Vec<NotificationPayload>>>,
    reject_status: Arc<Mutex<Option<u16>>>,
    stall: Arc<Mutex<bool>>,
    notify: Arc<Notify>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every delivery with `status` (recorded all the same).
    pub fn rejecting(self, status: u16) -> Self {
        *self.reject_status.lock().unwrap() = Some(status);
        self
    }

    /// Never complete a delivery.
    pub fn stalling(self) -> Self {
        *self.stall.lock().unwrap() = true;
        self
    }

    pub fn delivered(&self) -> Vec<NotificationPayload> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    /// Wait until at least `n` payloads have been delivered.
    pub async fn wait_for_deliveries(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.count() >= n {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), SinkError> {
        let stall = *self.stall.lock().unwrap();
        if stall {
            std::future::pending::<()>().await;
        }

        self.delivered.lock().unwrap().push(payload.clone());
        self.notify.notify_waiters();

        let reject_status = *self.reject_status.lock().unwrap();
        match reject_status {
            Some(status) => Err(SinkError::Rejected {
                status,
                body: "rejected by test".to_string(),
            }),
            None => Ok(()),
        }
    }
}
