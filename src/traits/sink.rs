//! Notification delivery seam.

use async_trait::async_trait;
use thiserror::Error;

use super::http::HttpError;
use crate::models::NotificationPayload;

/// Why a sink could not deliver a notification.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The receiving service answered with a non-success status
    #[error("sink rejected notification ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("sink transport failed: {0}")]
    Transport(#[from] HttpError),

    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for finished notifications.
///
/// Delivery is attempted once; failures are reported, never retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), SinkError>;
}
