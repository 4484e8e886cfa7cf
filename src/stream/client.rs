//! Pull-based reader over the notification stream.
//!
//! [`StreamClient`] holds at most one open body at a time. Every call that
//! can suspend races the caller's [`CancellationToken`]; when the token
//! fires, the body is dropped before the call returns.

use bytes::Bytes;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::ConnectionState;
use crate::error::StreamError;
use crate::models::ChangeEvent;
use crate::sse::{decode_batch, parse_sse_line, DecodeError, LineBuffer};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// What the stream produced next.
#[derive(Debug)]
pub enum StreamItem {
    /// A decoded batch, possibly empty
    Batch(Vec<ChangeEvent>),
    /// A payload that did not decode; the connection is still open
    Malformed(DecodeError),
    /// The server closed the body cleanly
    EndOfStream,
}

enum ReadOutcome {
    Cancelled,
    Chunk(Option<Result<Bytes, HttpError>>),
}

pub struct StreamClient {
    http: Arc<dyn HttpClient>,
    endpoint: String,
    headers: Headers,
    state: ConnectionState,
    body: Option<ByteStream>,
    buffer: LineBuffer,
}

impl StreamClient {
    pub fn new(http: Arc<dyn HttpClient>, endpoint: impl Into<String>, headers: Headers) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            headers,
            state: ConnectionState::Disconnected,
            body: None,
            buffer: LineBuffer::new(),
        }
    }

    /// Cap on a single line of the body; a longer line drops the connection.
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.buffer = LineBuffer::with_max_line_bytes(max_line_bytes);
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Open the streaming GET, replacing any previous connection.
    pub async fn connect(&mut self, cancel: &CancellationToken) -> Result<(), StreamError> {
        self.disconnect();
        if cancel.is_cancelled() {
            self.shutdown();
            return Err(StreamError::Cancelled);
        }

        self.state = ConnectionState::Connecting;
        debug!("Connecting to {}", self.endpoint);

        let http = Arc::clone(&self.http);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = http.get_stream(&self.endpoint, &self.headers) => Some(result),
        };

        match outcome {
            None => {
                self.shutdown();
                Err(StreamError::Cancelled)
            }
            Some(Ok(body)) => {
                info!("Connected to change stream at {}", self.endpoint);
                self.body = Some(body);
                self.state = ConnectionState::Streaming;
                Ok(())
            }
            Some(Err(err)) => {
                self.state = ConnectionState::Disconnected;
                Err(StreamError::ConnectFailed {
                    url: self.endpoint.clone(),
                    status: err.status(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Next line of the body without its terminator.
    ///
    /// `Ok(None)` means the server closed the body cleanly. An unterminated
    /// fragment left at close is returned as one last line first.
    pub async fn next_line(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StreamError> {
        loop {
            if let Some(line) = self.buffer.next_line() {
                return Ok(Some(line));
            }
            if self.buffer.is_overflowing() {
                let limit = self.buffer.max_line_bytes();
                warn!("Change stream line exceeds {} bytes, dropping connection", limit);
                self.disconnect();
                return Err(StreamError::ConnectionLost {
                    message: format!("line exceeds {} bytes without a newline", limit),
                });
            }

            let outcome = match self.body.as_mut() {
                Some(body) => tokio::select! {
                    biased;
                    _ = cancel.cancelled() => ReadOutcome::Cancelled,
                    chunk = body.next() => ReadOutcome::Chunk(chunk),
                },
                None => return Ok(self.buffer.finish()),
            };

            match outcome {
                ReadOutcome::Cancelled => {
                    self.shutdown();
                    return Err(StreamError::Cancelled);
                }
                ReadOutcome::Chunk(Some(Ok(chunk))) => self.buffer.push(&chunk),
                ReadOutcome::Chunk(Some(Err(err))) => {
                    warn!("Change stream read failed: {}", err);
                    self.disconnect();
                    return Err(StreamError::ConnectionLost {
                        message: err.to_string(),
                    });
                }
                ReadOutcome::Chunk(None) => {
                    debug!("Change stream closed by server");
                    self.body = None;
                    self.state = ConnectionState::Disconnected;
                    return Ok(self.buffer.finish());
                }
            }
        }
    }

    /// Read until the next `data:` payload and decode it.
    ///
    /// Unmarked lines and empty payloads are skipped.
    pub async fn next_item(&mut self, cancel: &CancellationToken) -> Result<StreamItem, StreamError> {
        loop {
            let line = match self.next_line(cancel).await? {
                Some(line) => line,
                None => return Ok(StreamItem::EndOfStream),
            };

            let parsed = parse_sse_line(&line);
            if let Some(payload) = parsed.payload() {
                return Ok(match decode_batch(payload) {
                    Ok(batch) => StreamItem::Batch(batch),
                    Err(err) => StreamItem::Malformed(err),
                });
            }
        }
    }

    /// Drop the current connection, if any. A later `connect` may reopen it.
    pub fn disconnect(&mut self) {
        if self.body.take().is_some() {
            debug!("Dropped change stream connection");
        }
        self.buffer.clear();
        if self.state != ConnectionState::Cancelled {
            self.state = ConnectionState::Disconnected;
        }
    }

    /// Release the connection for good.
    pub fn shutdown(&mut self) {
        self.disconnect();
        self.state = ConnectionState::Cancelled;
    }
}
