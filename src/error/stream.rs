//! Streaming-related error types.
//!
//! This module defines errors that end (or never start) a notification
//! stream session: failed handshakes, lost connections and cancellation.

use std::fmt;

/// Stream-specific error variants.
///
/// Every variant except [`StreamError::Cancelled`] is transient: the
/// supervisory loop logs it, waits out the reconnect delay and connects
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The initial handshake failed (transport error or non-200 status).
    ConnectFailed {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// A transport-level read error occurred mid-stream.
    ConnectionLost {
        message: String,
    },

    /// The stream was cancelled by an explicit shutdown request.
    Cancelled,
}

impl StreamError {
    /// Check if the supervisory loop should open a new connection.
    pub fn should_reconnect(&self) -> bool {
        match self {
            StreamError::ConnectFailed { .. } | StreamError::ConnectionLost { .. } => true,
            StreamError::Cancelled => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectFailed {
                status: Some(status),
                ..
            } => match *status {
                401 | 403 => format!(
                    "The notification API refused the connection (HTTP {}). Check the access token.",
                    status
                ),
                _ => format!(
                    "The notification API returned HTTP {}. Will retry shortly.",
                    status
                ),
            },
            StreamError::ConnectFailed { status: None, .. } => {
                "Unable to reach the notification API. Will retry shortly.".to_string()
            }
            StreamError::ConnectionLost { .. } => {
                "Connection to the notification API was lost. Attempting to reconnect...".to_string()
            }
            StreamError::Cancelled => "Monitoring cancelled.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectFailed { .. } => "E_STREAM_CONNECT",
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::Cancelled => "E_STREAM_CANCELLED",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectFailed {
                url,
                status: Some(status),
                message,
            } => write!(f, "Connect to {} failed (HTTP {}): {}", url, status, message),
            StreamError::ConnectFailed {
                url,
                status: None,
                message,
            } => write!(f, "Connect to {} failed: {}", url, message),
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::Cancelled => write!(f, "Stream cancelled"),
        }
    }
}

impl std::error::Error for StreamError {}
