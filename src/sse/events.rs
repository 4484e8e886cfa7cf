//! Line and payload types for the change-notification stream.

use thiserror::Error;

/// One classified line of the stream body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: message")
    Event(String),
    /// Payload carried after the `data:` marker, whitespace trimmed
    Data(String),
    /// Blank separator line
    Empty,
    /// Keep-alive, comment, or any other unmarked line
    Comment(String),
}

impl SseLine {
    /// Payload text, if this line carries a non-empty one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            SseLine::Data(data) if !data.is_empty() => Some(data),
            _ => None,
        }
    }
}

/// A `data:` payload that did not decode as an event batch.
///
/// Recoverable: the stream stays open and the next line is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed event batch: {message}")]
pub struct DecodeError {
    /// Raw payload exactly as it arrived
    pub payload: String,
    /// Decoder diagnostic
    pub message: String,
}

impl DecodeError {
    pub fn new(payload: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            message: message.into(),
        }
    }
}
